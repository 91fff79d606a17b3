use super::*;

impl ScfConfig {
    /// Get a value with validation - returns detailed error with line info if validation fails
    pub fn get_validated<T, F>(&self, path: &str, validator: F, valid_values: &str) -> Result<T, ScfError>
    where
        T: TryFrom<Value, Error = ScfError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(path)?;

        if !validator(&typed_value) {
            return Err(self.validation_error(
                path,
                format!("Invalid value for `{}`\nExpected: {}", path, valid_values),
                format!("Valid values are: {}", valid_values),
                450,
            ));
        }

        Ok(typed_value)
    }

    /// Get a string value and validate it's one of the allowed values (case-insensitive)
    pub fn get_string_enum(&self, path: &str, allowed_values: &[&str]) -> Result<String, ScfError> {
        let value: String = self.get(path)?;
        let lower_value = value.to_lowercase();

        if !allowed_values.iter().any(|&v| v.to_lowercase() == lower_value) {
            return Err(self.validation_error(
                path,
                format!("Invalid value '{}' for `{}`", value, path),
                format!("Expected one of: {}", allowed_values.join(", ")),
                451,
            ));
        }

        Ok(value)
    }

    fn validation_error(&self, path: &str, message: String, hint: String, code: u32) -> ScfError {
        let err = ScfError::ValidationError {
            message,
            line: 0,
            column: 0,
            hint: Some(hint),
            code: Some(code),
        };
        match helpers::lookup(&self.document, path) {
            Some(found) => access::enhance_error_with_line_info(err, &found.section, &found.key, &self.raw_content),
            None => err,
        }
    }
}
