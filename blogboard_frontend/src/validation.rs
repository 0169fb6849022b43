use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

pub fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), String> {
    require("Email", value)?;
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err("Enter a valid email address".to_string())
    }
}
