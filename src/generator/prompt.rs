use serde_json::{Map, Value};

use super::error::GeneratorError;

pub const SYSTEM_INSTRUCTION: &str = "You are a professional real estate copywriter. \
Write compelling, attractive property descriptions that highlight key features \
and appeal to potential renters. Keep descriptions around 150 words.";

const DEFAULT_TITLE: &str = "Property";
const DEFAULT_TYPE: &str = "rental";
const DEFAULT_LOCATION: &str = "N/A";
const DEFAULT_PRICE: &str = "N/A";
const DEFAULT_FACILITIES: &str = "Basic amenities";

/// Listing attributes used to fill the prompt template. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptData {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub facilities: Option<String>,
}

impl PromptData {
    /// Picks the known keys out of a JSON object. Unknown keys are ignored.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            title: field_text(object, "title"),
            kind: field_text(object, "type"),
            location: field_text(object, "location"),
            price: field_text(object, "price"),
            facilities: field_text(object, "facilities"),
        }
    }
}

fn field_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Decodes the single command-line argument into prompt data.
pub fn parse_prompt_arg(arg: Option<&str>) -> Result<PromptData, GeneratorError> {
    let raw = arg.ok_or(GeneratorError::NoPromptData)?;
    let value: Value =
        serde_json::from_str(raw).map_err(|err| GeneratorError::InvalidJson(err.to_string()))?;
    match value {
        Value::Object(object) => Ok(PromptData::from_object(&object)),
        _ => Err(GeneratorError::InvalidJson(
            "prompt data must be a JSON object".to_string(),
        )),
    }
}

pub fn compose_prompt(data: &PromptData) -> String {
    format!(
        "Write an attractive property description for:\n\
         Title: {}\n\
         Type: {}\n\
         Location: {}\n\
         Price: {}\n\
         Facilities: {}",
        data.title.as_deref().unwrap_or(DEFAULT_TITLE),
        data.kind.as_deref().unwrap_or(DEFAULT_TYPE),
        data.location.as_deref().unwrap_or(DEFAULT_LOCATION),
        data.price.as_deref().unwrap_or(DEFAULT_PRICE),
        data.facilities.as_deref().unwrap_or(DEFAULT_FACILITIES),
    )
}
