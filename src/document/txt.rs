use crate::errors::BotError;

pub fn extract_txt(bytes: &[u8]) -> Result<String, BotError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
