use chrono::NaiveDate;

use crate::errors::FieldErrors;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const CREATE_FAILED: &str = "Failed to create astrologer. Please check the fields.";
pub const UPDATE_FAILED: &str = "Failed to update astrologer. Please check the fields.";

/// An astrologer profile as submitted by the admin form. Optional fields
/// left blank are omitted from the upstream payload so the API applies
/// its own defaults.
#[derive(Debug, Clone, Default)]
pub struct AstrologerForm {
    pub name: String,
    pub email: String,
    pub expertise_id: i64,
    pub bio: String,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<ProfileImage>,
}

#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn validate(form: &AstrologerForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.name.chars().count() < 2 {
        errors.add("name", "Name must be at least 2 characters.");
    }
    if !is_valid_email(&form.email) {
        errors.add("email", "Invalid email address.");
    }
    if form.expertise_id < 1 {
        errors.add("expertise_id", "Please select an expertise.");
    }
    if form.bio.chars().count() < 10 {
        errors.add("bio", "Bio must be at least 10 characters.");
    }
    if let Some(image) = &form.profile_image {
        if image.bytes.len() > MAX_IMAGE_BYTES {
            errors.add("profile_image", "Max image size is 5MB.");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_email(raw: &str) -> bool {
    if raw.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn base_form(form: &AstrologerForm) -> reqwest::multipart::Form {
    let mut mp = reqwest::multipart::Form::new()
        .text("name", form.name.clone())
        .text("email", form.email.clone())
        .text("expertise_id", form.expertise_id.to_string())
        .text("bio", form.bio.clone());

    if let Some(v) = non_empty(&form.experience) {
        mp = mp.text("experience", v.to_string());
    }
    if let Some(v) = non_empty(&form.language) {
        mp = mp.text("language", v.to_string());
    }
    if let Some(v) = non_empty(&form.location) {
        mp = mp.text("location", v.to_string());
    }
    if let Some(image) = &form.profile_image {
        if !image.bytes.is_empty() {
            mp = mp.part(
                "profile_image",
                reqwest::multipart::Part::bytes(image.bytes.clone())
                    .file_name(image.filename.clone()),
            );
        }
    }
    mp
}

/// Multipart payload for `register_astrologer.php`; the registration
/// date is stamped server-side.
pub fn registration_form(
    form: &AstrologerForm,
    register_date: NaiveDate,
) -> reqwest::multipart::Form {
    base_form(form).text("register_date", register_date.format("%Y-%m-%d").to_string())
}

/// Multipart payload for `update_profile_astrologer.php`.
pub fn update_form(form: &AstrologerForm, astrologer_id: i64) -> reqwest::multipart::Form {
    base_form(form).text("astrologer_id", astrologer_id.to_string())
}
