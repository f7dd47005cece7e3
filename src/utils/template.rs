//! String template rendering utilities.

use std::collections::HashMap;

/// Replace `{{key}}` placeholders with values from the map. Unknown
/// placeholders are left in place.
pub fn render_map(template: &str, variables: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_placeholders() {
        let result = render_map("build {{target}} {{target}}", &vars(&[("target", "release")]));
        assert_eq!(result, "build release release");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        let result = render_map("hello {{who}}", &vars(&[("target", "release")]));
        assert_eq!(result, "hello {{who}}");
    }
}
