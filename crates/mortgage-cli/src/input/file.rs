use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> InputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml") | Some("yml") => InputFormat::Yaml,
        _ => InputFormat::Json,
    }
}

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse(&contents, detect_format(&canonical))
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn parse<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

/// Resolve the path against the working directory and make sure it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::affordability::HousingCostAssumptions;
    use rust_decimal_macros::dec;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("loan.yaml")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("loan.YML")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("loan.json")), InputFormat::Json);
        assert_eq!(detect_format(Path::new("loan")), InputFormat::Json);
    }

    #[test]
    fn test_parse_yaml_and_json_agree() {
        let yaml = "annual_insurance: 2400\nproperty_tax_annual_percent: 1.1\n";
        let json = r#"{"annual_insurance": "2400", "property_tax_annual_percent": "1.1"}"#;
        let from_yaml: HousingCostAssumptions = parse(yaml, InputFormat::Yaml).unwrap();
        let from_json: HousingCostAssumptions = parse(json, InputFormat::Json).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml.annual_insurance, dec!(2400));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<HousingCostAssumptions>("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
