/// Lower-cases, collapses whitespace runs to one space and trims.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}
