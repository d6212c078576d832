use std::path::Path;

pub fn file_exists(file_name: impl AsRef<Path>) -> bool {
    file_name.as_ref().exists()
}

/* Value parser for the cli: the path must exist, it isn't opened here */
pub fn existing_file(value: &str) -> Result<String, String> {
    if !file_exists(value) {
        return Err(format!("{value} does not exist"));
    }
    Ok(value.to_string())
}
