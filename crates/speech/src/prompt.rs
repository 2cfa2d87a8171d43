/// Build the natural-language prompt sent to the generation backend
///
/// The prompt is at most three paragraphs, blank-line separated: the
/// caller's delivery instructions, a rate clause derived from `speed`, and
/// the input text itself. The rate clause is emitted only when `speed`
/// deviates from 1.0; a zero (unset) speed counts as 1.0.
#[allow(clippy::float_cmp)]
pub fn build_prompt(instructions: Option<&str>, speed: f64, input: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::with_capacity(3);

    if let Some(instructions) = instructions.filter(|text| !text.is_empty()) {
        paragraphs.push(instructions.to_owned());
    }

    if speed != 0.0 && speed != 1.0 {
        let direction = if speed < 1.0 { "slower" } else { "faster" };
        paragraphs.push(format!(
            "Please speak at a {direction} pace, about {speed} times the normal speaking rate."
        ));
    }

    paragraphs.push(input.to_owned());

    paragraphs.join("\n\n")
}
