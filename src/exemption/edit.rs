use crate::error::ExemptionError;

/// Length of the code prefix stored in the exemption list.
const CODE_PREFIX_LEN: usize = 3;

/// Reduces user input to a stored exemption code: the first three
/// characters, upper-cased.
pub fn normalize_code(input: &str) -> Result<String, ExemptionError> {
    let code: String = input
        .trim()
        .chars()
        .take(CODE_PREFIX_LEN)
        .flat_map(char::to_uppercase)
        .collect();

    if code.is_empty() {
        return Err(ExemptionError::EmptyCode);
    }
    Ok(code)
}

/// A single change to the exemption list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptionEdit {
    Add(String),
    Remove(String),
}

impl ExemptionEdit {
    /// Builds an edit from an action word (`add` / `remove`) and a raw code.
    pub fn parse(action: &str, code: &str) -> Result<Self, ExemptionError> {
        match action.trim().to_lowercase().as_str() {
            "add" => Ok(ExemptionEdit::Add(normalize_code(code)?)),
            "remove" => Ok(ExemptionEdit::Remove(normalize_code(code)?)),
            other => Err(ExemptionError::UnknownAction(other.to_string())),
        }
    }

    /// Applies the edit and returns the new list.
    ///
    /// Adding a code already present leaves the list unchanged.
    pub fn apply(self, mut subjects: Vec<String>) -> Result<Vec<String>, ExemptionError> {
        match self {
            ExemptionEdit::Add(code) => {
                if !subjects.contains(&code) {
                    subjects.push(code);
                }
            }
            ExemptionEdit::Remove(code) => {
                let idx = subjects
                    .iter()
                    .position(|s| *s == code)
                    .ok_or(ExemptionError::NotListed(code))?;
                subjects.remove(idx);
            }
        }
        Ok(subjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" mat101 ").unwrap(), "MAT");
        assert_eq!(normalize_code("ph").unwrap(), "PH");
        assert_eq!(normalize_code("   "), Err(ExemptionError::EmptyCode));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ExemptionEdit::parse("ADD", "vov114").unwrap(),
            ExemptionEdit::Add("VOV".to_string())
        );
        assert_eq!(
            ExemptionEdit::parse("remove", "trs").unwrap(),
            ExemptionEdit::Remove("TRS".to_string())
        );
        assert_eq!(
            ExemptionEdit::parse("delete", "trs"),
            Err(ExemptionError::UnknownAction("delete".to_string()))
        );
    }

    #[test]
    fn test_add_appends_once() {
        let subjects = ExemptionEdit::Add("PHE".to_string())
            .apply(list(&["TRS"]))
            .unwrap();
        assert_eq!(subjects, list(&["TRS", "PHE"]));

        let subjects = ExemptionEdit::Add("PHE".to_string()).apply(subjects).unwrap();
        assert_eq!(subjects, list(&["TRS", "PHE"]));
    }

    #[test]
    fn test_remove_keeps_order() {
        let subjects = ExemptionEdit::Remove("VOV".to_string())
            .apply(list(&["TRS", "VOV", "GDQ"]))
            .unwrap();
        assert_eq!(subjects, list(&["TRS", "GDQ"]));
    }

    #[test]
    fn test_remove_missing_code() {
        assert_eq!(
            ExemptionEdit::Remove("OJT".to_string()).apply(list(&["TRS"])),
            Err(ExemptionError::NotListed("OJT".to_string()))
        );
    }
}
