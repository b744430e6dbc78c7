//! `readFile`, `file`.

use crate::error::FunctionError;
use crate::function::{Function, FunctionParameter, NativeFunction};
use crate::value::{OpaqueValue, Value, ValueType};
use json_template::Span;
use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file to be attached to a request body, produced by `file(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = guess_content_type(&path).to_string();
        Self {
            path,
            file_name,
            content_type,
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl OpaqueValue for FileReference {
    fn type_name(&self) -> &'static str {
        "FileReference"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path.to_string_lossy(),
            "fileName": self.file_name,
            "contentType": self.content_type,
        })
    }
}

fn guess_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "json" => "application/json",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

fn read_file_eval(
    f: &NativeFunction,
    args: Vec<Value>,
    span: Span,
) -> Result<Value, FunctionError> {
    let path = args[0].as_str().unwrap_or_default();
    if !Path::new(path).is_file() {
        return Err(f.error(format!("File {path} not found"), span));
    }
    std::fs::read_to_string(path)
        .map(Value::String)
        .map_err(|e| f.error(format!("Cannot read {path}: {e}"), span))
}

fn file_eval(f: &NativeFunction, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
    let path = args[0].as_str().unwrap_or_default();
    if !Path::new(path).is_file() {
        return Err(f.error(format!("File {path} not found"), span));
    }
    let mut reference = FileReference::new(path);
    if let Some(name) = args[1].as_str() {
        reference.file_name = name.to_string();
    }
    if let Some(content_type) = args[2].as_str() {
        reference.content_type = content_type.to_string();
    }
    Ok(Value::Opaque(Arc::new(reference)))
}

pub fn functions() -> Vec<NativeFunction> {
    let optional_text = |name: &str| {
        FunctionParameter::optional(name, &[ValueType::String, ValueType::Null], None)
    };
    vec![
        NativeFunction::new(
            "readFile",
            vec![FunctionParameter::required("path", &[ValueType::String])],
            read_file_eval,
        ),
        NativeFunction::new(
            "file",
            vec![
                FunctionParameter::required("path", &[ValueType::String]),
                optional_text("fileName"),
                optional_text("contentType"),
            ],
            file_eval,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_reference_defaults_from_path() {
        let reference = FileReference::new("/tmp/report.PDF");
        assert_eq!(reference.file_name, "report.PDF");
        assert_eq!(reference.content_type, "application/pdf");
        assert_eq!(
            FileReference::new("data.bin").content_type,
            "application/octet-stream"
        );
    }
}
