use super::*;

impl ScfConfig {
    /// Get a typed value using `section.key` notation.
    ///
    /// Segments past the key index into maps (by string key) and lists or tuples
    /// (by position). Both `snake_case` and `kebab-case` spellings are tried.
    ///
    /// # Examples
    /// ```no_run
    /// # use scf::ScfConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ScfConfig::from_file("config.scf")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// let first: String = config.get("server.allowed.0")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns `NotFound` if the path doesn't exist, or `TypeError` if the value
    /// can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, ScfError>
    where
        T: TryFrom<Value, Error = ScfError>
    {
        let found = self.find(path)?;
        let (section, key) = (found.section.clone(), found.key.clone());
        T::try_from(found.value.clone()).map_err(|e| {
            enhance_error_with_line_info(e, &section, &key, &self.raw_content)
        })
    }

    /// Get an optional typed value - returns `None` if the path doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, ScfError>
    where
        T: TryFrom<Value, Error = ScfError>
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(ScfError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use scf::ScfConfig;
    /// # let config = ScfConfig::from_file("config.scf").unwrap();
    /// let timeout = config.get_or("server.timeout", 30u64);
    /// let debug = config.get_or("server.debug", false);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = ScfError>
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value` from the configuration.
    pub fn get_value(&self, path: &str) -> Result<Value, ScfError> {
        self.find(path).map(|found| found.value.clone())
    }

    /// Get all keys of a section, in definition order.
    pub fn get_keys(&self, section: &str) -> Result<Vec<String>, ScfError> {
        self.document
            .section(section)
            .map(|s| s.keys().map(str::to_string).collect())
            .ok_or_else(|| ScfError::NotFound {
                path: section.to_string(),
                hint: Some("Check the {section} header name".into()),
                code: Some(304),
            })
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.find(path).is_ok()
    }

    /// Exact lookup first, then snake/kebab spellings of each segment.
    fn find(&self, path: &str) -> Result<helpers::Found<'_>, ScfError> {
        if let Some(found) = helpers::lookup(&self.document, path) {
            return Ok(found);
        }

        let segs: Vec<&str> = path.split('.').collect();

        // DFS over combinations, stop on first that resolves
        fn dfs<'a>(
            doc: &'a Document,
            segs: &[&str],
            i: usize,
            cur: &mut Vec<String>,
        ) -> Option<helpers::Found<'a>> {
            if i == segs.len() {
                return helpers::lookup(doc, &cur.join("."));
            }

            for v in helpers::variants(segs[i]) {
                cur.push(v);
                if let Some(found) = dfs(doc, segs, i + 1, cur) {
                    return Some(found);
                }
                cur.pop();
            }
            None
        }

        dfs(&self.document, &segs, 0, &mut Vec::new()).ok_or_else(|| ScfError::NotFound {
            path: path.to_string(),
            hint: Some("Use `section.key`; check that both exist in your config file".into()),
            code: Some(304),
        })
    }
}

/// Attach the defining line to type and validation errors.
pub(super) fn enhance_error_with_line_info(
    e: ScfError,
    section: &str,
    key: &str,
    raw_content: &str,
) -> ScfError {
    let (line, snippet) = helpers::find_config_line(section, key, raw_content);
    if line == 0 {
        return e;
    }

    match e {
        ScfError::TypeError { message, hint, code, .. } => ScfError::TypeError {
            message: format!("{}\n  → {}", message, snippet),
            line,
            column: 0,
            hint,
            code,
        },
        ScfError::ValidationError { message, hint, code, .. } => ScfError::ValidationError {
            message: format!("{}\n  → {}", message, snippet),
            line,
            column: 0,
            hint,
            code,
        },
        other => other,
    }
}
