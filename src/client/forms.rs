//! Form view models for the admin, player, and team editors.
//!
//! Validation runs before anything is sent, so the editor can show a message
//! without a round trip. The server applies its own checks regardless.

use reqwest::multipart::{Form, Part};

/// Photo types the editors accept.
pub const PHOTO_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Largest photo the editors accept (5 MB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Why a form was rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingField(&'static str),
    InvalidLink(&'static str),
    InvalidPhotoType(String),
    PhotoTooLarge(usize),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingField(field) => write!(f, "Field '{}' is required", field),
            FormError::InvalidLink(network) => {
                write!(f, "The {} link must start with https://", network)
            }
            FormError::InvalidPhotoType(content_type) => write!(
                f,
                "Invalid image format {}. Use only JPG, JPEG or PNG",
                content_type
            ),
            FormError::PhotoTooLarge(size) => write!(
                f,
                "Image is {} bytes; the maximum is {} bytes",
                size, MAX_PHOTO_BYTES
            ),
        }
    }
}

impl std::error::Error for FormError {}

/// An image picked in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    pub fn validate(&self) -> Result<(), FormError> {
        if !PHOTO_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(FormError::InvalidPhotoType(self.content_type.clone()));
        }
        if self.data.len() > MAX_PHOTO_BYTES {
            return Err(FormError::PhotoTooLarge(self.data.len()));
        }
        Ok(())
    }

    fn into_part(self) -> Result<Part, reqwest::Error> {
        Part::bytes(self.data)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
    }
}

/// Social links as typed in the editor. Blank means "no link".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialInputs {
    pub instagram: String,
    pub twitter: String,
    pub twitch: String,
}

impl SocialInputs {
    pub fn validate(&self) -> Result<(), FormError> {
        for (network, url) in [
            ("Instagram", &self.instagram),
            ("Twitter", &self.twitter),
            ("Twitch", &self.twitch),
        ] {
            let url = url.trim();
            if !url.is_empty() && !url.starts_with("https://") {
                return Err(FormError::InvalidLink(network));
            }
        }
        Ok(())
    }

    fn write_to(&self, form: Form) -> Form {
        form.text("insta", self.instagram.trim().to_string())
            .text("twitter", self.twitter.trim().to_string())
            .text("twitch", self.twitch.trim().to_string())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

/// The admin editor. Used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminForm {
    pub nome: String,
    pub titulo: String,
    pub descricao: String,
    pub socials: SocialInputs,
    /// `None` keeps the current photo on update.
    pub foto: Option<PhotoUpload>,
}

impl AdminForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require("nome", &self.nome)?;
        require("titulo", &self.titulo)?;
        require("descricao", &self.descricao)?;
        self.socials.validate()?;
        if let Some(foto) = &self.foto {
            foto.validate()?;
        }
        Ok(())
    }

    pub(crate) fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let form = Form::new()
            .text("nome", self.nome.trim().to_string())
            .text("titulo", self.titulo.trim().to_string())
            .text("descricao", self.descricao.trim().to_string());
        let form = self.socials.write_to(form);

        match self.foto {
            Some(foto) => Ok(form.part("foto", foto.into_part()?)),
            None => Ok(form),
        }
    }
}

/// The player editor. A photo is required when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub nome: String,
    pub titulo: String,
    pub descricao: String,
    pub socials: SocialInputs,
    /// Team id; `None` keeps the current team on update.
    pub time: Option<i64>,
    pub foto: Option<PhotoUpload>,
}

impl PlayerForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require("nome", &self.nome)?;
        require("titulo", &self.titulo)?;
        require("descricao", &self.descricao)?;
        self.socials.validate()?;
        if let Some(foto) = &self.foto {
            foto.validate()?;
        }
        Ok(())
    }

    /// Creation additionally needs a team and a photo.
    pub fn validate_new(&self) -> Result<(), FormError> {
        self.validate()?;
        if self.time.is_none() {
            return Err(FormError::MissingField("time"));
        }
        if self.foto.is_none() {
            return Err(FormError::MissingField("foto"));
        }
        Ok(())
    }

    pub(crate) fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new()
            .text("nome", self.nome.trim().to_string())
            .text("titulo", self.titulo.trim().to_string())
            .text("descricao", self.descricao.trim().to_string());
        form = self.socials.write_to(form);

        if let Some(time) = self.time {
            form = form.text("time", time.to_string());
        }
        if let Some(foto) = self.foto {
            form = form.part("foto", foto.into_part()?);
        }
        Ok(form)
    }
}

/// The team editor. Both images are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub id: i64,
    pub nome: String,
    pub rota: String,
    pub foto: Option<PhotoUpload>,
    pub jogo: Option<PhotoUpload>,
}

impl TeamForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require("nome", &self.nome)?;
        require("rota", &self.rota)?;
        self.foto
            .as_ref()
            .ok_or(FormError::MissingField("foto"))?
            .validate()?;
        self.jogo
            .as_ref()
            .ok_or(FormError::MissingField("jogo"))?
            .validate()
    }

    pub(crate) fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new()
            .text("id", self.id.to_string())
            .text("nome", self.nome.trim().to_string())
            .text("rota", self.rota.trim().to_string());

        if let Some(foto) = self.foto {
            form = form.part("foto", foto.into_part()?);
        }
        if let Some(jogo) = self.jogo {
            form = form.part("jogo", jogo.into_part()?);
        }
        Ok(form)
    }
}
