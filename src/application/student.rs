use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(PartialEq, Debug, Eq, Clone, Serialize, Deserialize)]
pub struct Student {
    id: String,
    name: String,
    email: String,
}

impl Student {
    pub fn new(id: String, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.id, self.name, self.email)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn student_serializes_with_plain_field_names() {
        let student = Student::new("std_1".to_string(), "Ann", "ann@example.com");

        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": "std_1", "name": "Ann", "email": "ann@example.com"})
        );
    }
}
