use serde::Deserialize;
use serde_json::Value;

/// Represents one entry of the ticket field schema, used to discover dynamic
/// picklist choices such as status labels.
#[derive(Debug, Deserialize, Clone)]
pub struct TicketField {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Upstream choice payloads vary by field type: either a label-to-code
    /// object or a label-to-array object whose first element is the code.
    #[serde(default)]
    pub choices: Option<Value>,
}

impl TicketField {
    /// True when this entry is the status field. The upstream schema is
    /// matched case-sensitively on either the internal name or the label.
    pub fn is_status_field(&self) -> bool {
        self.name == "status" || self.label == "Status"
    }

    /// Looks up the numeric code for a choice label, accepting both choice
    /// payload shapes.
    pub fn choice_code(&self, label: &str) -> Option<i64> {
        let choices = self.choices.as_ref()?.as_object()?;
        match choices.get(label)? {
            Value::Number(code) => code.as_i64(),
            Value::Array(entries) => entries.first().and_then(Value::as_i64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TicketField;

    fn field(json: &str) -> TicketField {
        serde_json::from_str(json).expect("field should parse")
    }

    #[test]
    fn status_field_matches_name_or_label_case_sensitively() {
        assert!(field(r#"{"id":1,"name":"status","label":"Ticket status"}"#).is_status_field());
        assert!(field(r#"{"id":1,"name":"fd_status","label":"Status"}"#).is_status_field());
        assert!(!field(r#"{"id":1,"name":"STATUS","label":"STATUS"}"#).is_status_field());
    }

    #[test]
    fn choice_code_accepts_both_payload_shapes() {
        let flat = field(r#"{"id":1,"name":"status","label":"Status","choices":{"Open":2,"Closed":5}}"#);
        assert_eq!(flat.choice_code("Open"), Some(2));

        let nested = field(
            r#"{"id":1,"name":"status","label":"Status","choices":{"Escalated":[6,"Being escalated"]}}"#,
        );
        assert_eq!(nested.choice_code("Escalated"), Some(6));
        assert_eq!(nested.choice_code("Missing"), None);
    }
}
