use super::dto::VariableTable;

/// 손글씨 수식 이미지 분석 프롬프트
pub struct AnalyzePrompt;

const PRECEDENCE_RULES: &str = r#"Use the PEMDAS rule when evaluating expressions. The priority order is: Parentheses, Exponents, Multiplication and Division (left to right), Addition and Subtraction (left to right). Parentheses bind tightest, then Exponents, then Multiplication and Division, and Addition and Subtraction last.
For example:
Q. 2 + 3 * 4
(3 * 4) => 12, 2 + 12 = 14.
Q. 2 + 3 + 5 * 4 - 8 / 2
5 * 4 => 20, 8 / 2 => 4, 2 + 3 => 5, 5 + 20 => 25, 25 - 4 => 21."#;

const PROBLEM_CATEGORIES: &str = r#"The image can contain the following kinds of problems. When it contains more than one, solve ALL of them in sequence starting from the first, and give an answer for each. Always explain how you got the answer in the 'steps' field.
1. Simple arithmetic expressions such as 2 + 2, 3 * 4, 5 / 6, 7 - 8: return a LIST WITH ONE DICT [{'expr': 'the expression', 'result': the computed answer, 'steps': 'step-by-step solution'}].
2. Systems of equations such as x^2 + 2x + 1 = 0, 3y + 4x = 0, 5x^2 + 6y + 7 = 12: solve for each variable and return a COMMA SEPARATED LIST OF DICTS, one per variable, e.g. {'expr': 'x', 'result': 2, 'assign': True, 'steps': 'step-by-step solution'} and {'expr': 'y', 'result': 5, 'assign': True, 'steps': 'step-by-step solution'}.
3. Variable assignments such as x = 4, y = 5, z = 6: keep the variable name as 'expr' and the value as 'result', add 'assign': True, and return a LIST OF DICTS whose 'steps' describe the assignment.
4. Geometric measurements such as area, surface area, total surface area or volume of 2D and 3D shapes (for example the total surface area of a cylinder 10cm long and 2cm wide): return a LIST WITH ONE DICT [{'expr': 'the problem', 'result': 'the answer with units', 'steps': 'step-by-step solution naming the formulas used'}].
5. Trigonometric identities and expressions such as sin2x = 2sinxcosx, sin^2x + cos^2x = 1, tan(90 - x) = cot x: simplify or verify using other identities and return [{'expr': 'the trigonometric expression', 'result': 'the answer', 'steps': 'step-by-step solution naming the identities used'}].
6. Graphical problems and abstract concepts: word problems drawn as a scene (colliding cars, Pythagorean setups, a cricket wagon wheel, shapes with annotations) or drawings that depict a concept (love, hate, jealousy, patriotism, a historic war, an invention, a discovery, a quote). PAY CLOSE ATTENTION TO THE DIFFERENT COLORS. For a drawn word problem return [{'expr': 'description of the problem', 'result': the answer, 'steps': 'step-by-step solution'}]. For a concept return the concept as the answer, e.g. {'expr': 'Drawing of a heart', 'result': 'Symbol of love', 'assign': True, 'steps': 'why the drawing represents this concept'}. Put spaces between all words of the description."#;

const FORMAT_RULES: &str = r#"Formatting rules:
- Respond with the list of dicts only. Do not wrap it in ``` or ```json and do not add any text before or after it.
- PROPERLY QUOTE every key and every string value so the response can be parsed as a literal.
- ALWAYS include a 'steps' field in every dict.
- DO NOT USE NEWLINE CHARACTERS OR ESCAPE SEQUENCES such as \n in the 'steps' field. Write the steps as continuous text separated by periods and commas."#;

impl AnalyzePrompt {
    /// 변수 테이블을 포함한 분석 프롬프트 생성
    pub fn build(variables: &VariableTable) -> String {
        format!(
            "You have been given an image with some mathematical expressions, equations, or graphical problems, and you need to solve them.\n\
             {PRECEDENCE_RULES}\n\n\
             {PROBLEM_CATEGORIES}\n\n\
             Here is a dictionary of user-assigned variables. If an expression uses any of these variables, substitute its value from this dictionary: {variables}\n\n\
             {FORMAT_RULES}",
            variables = Self::serialize_variables(variables),
        )
    }

    fn serialize_variables(variables: &VariableTable) -> String {
        // 문자열 키 map 직렬화는 실패하지 않음
        serde_json::to_string(variables).unwrap_or_else(|_| "{}".to_string())
    }
}
