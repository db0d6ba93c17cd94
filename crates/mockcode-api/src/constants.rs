/// Route accepting mockup uploads
pub const UPLOAD_ROUTE: &str = "/upload";

/// Relative URL the uploads directory is served under
pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";

/// Relative URL the public directory is served under
pub const PUBLIC_PREFIX: &str = "/public";

/// Multipart field names sent by the client UI
pub mod fields {
    pub const FILE: &str = "file";
    pub const FRAMEWORK: &str = "framework";
    pub const CSS_TYPE: &str = "cssType";
    pub const ADDITIONAL_INPUT: &str = "additionalInput";
}
