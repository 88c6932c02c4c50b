/// Token replaced by the report title when rendering a template
pub const TITLE_PLACEHOLDER: &str = "{{title}}";

/// Token replaced by the report description when rendering a template
pub const DESCRIPTION_PLACEHOLDER: &str = "{{description}}";

// =============================================================================
// UPLOADS
// =============================================================================

/// Multipart field names accepted by the upload endpoint
pub const UPLOAD_FIELDS: &[&str] = &["icon", "logo"];

/// Lower-case file extensions accepted by the upload endpoint
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["ico", "png", "jpg", "jpeg"];

/// URL prefix under which the public directory is served
pub const PUBLIC_URL_PREFIX: &str = "/public";
