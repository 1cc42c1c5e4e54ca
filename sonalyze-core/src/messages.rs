use crate::types::AnalysisStatus;

/// Display language for user-facing strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    PtBr,
    En,
}

impl Locale {
    /// Parse a language tag such as "pt", "pt-BR", "en" or "en_US".
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "pt" => Some(Self::PtBr),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// BCP 47 tag, for `<html lang>` and date formatting.
    pub fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }
}

/// Every message the dashboard can show the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    LoadUploadsFailed,
    ConnectionError,
    FileTooLarge,
    UnsupportedType,
    UploadFailed,
    UploadConnectionError,
    DeleteFailed,
    ReanalyzeFailed,
    TranscriptionFailed,
    TranscriptionConnectionError,
    TranscriptionUnavailable,
    AudioLoadFailed,
    ConfirmDelete,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::PtBr => self.pt_br(),
            Locale::En => self.en(),
        }
    }

    fn pt_br(self) -> &'static str {
        match self {
            Self::LoadUploadsFailed => "Erro ao carregar uploads",
            Self::ConnectionError => "Erro de conexão",
            Self::FileTooLarge => "Arquivo muito grande. Máximo permitido: 10MB",
            Self::UnsupportedType => {
                "Tipo de arquivo não suportado. Use MP3, WAV, FLAC, M4A, AAC ou OGG"
            }
            Self::UploadFailed => "Erro ao fazer upload",
            Self::UploadConnectionError => "Erro de conexão durante o upload",
            Self::DeleteFailed => "Erro ao excluir áudio",
            Self::ReanalyzeFailed => "Erro ao reprocessar áudio",
            Self::TranscriptionFailed => "Erro ao carregar transcrição",
            Self::TranscriptionConnectionError => "Erro de conexão ao carregar transcrição",
            Self::TranscriptionUnavailable => "Transcrição não disponível",
            Self::AudioLoadFailed => "Erro ao carregar áudio",
            Self::ConfirmDelete => "Tem certeza que deseja excluir este áudio?",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Self::LoadUploadsFailed => "Failed to load uploads",
            Self::ConnectionError => "Connection error",
            Self::FileTooLarge => "File too large. Maximum allowed: 10MB",
            Self::UnsupportedType => "Unsupported file type. Use MP3, WAV, FLAC, M4A, AAC or OGG",
            Self::UploadFailed => "Upload failed",
            Self::UploadConnectionError => "Connection error during upload",
            Self::DeleteFailed => "Failed to delete audio",
            Self::ReanalyzeFailed => "Failed to reanalyze audio",
            Self::TranscriptionFailed => "Failed to load transcription",
            Self::TranscriptionConnectionError => "Connection error while loading transcription",
            Self::TranscriptionUnavailable => "Transcription not available",
            Self::AudioLoadFailed => "Failed to load audio",
            Self::ConfirmDelete => "Are you sure you want to delete this audio?",
        }
    }
}

/// Short label for a status badge.
pub fn status_label(status: AnalysisStatus, locale: Locale) -> &'static str {
    match (locale, status) {
        (Locale::PtBr, AnalysisStatus::Pending) => "Pendente",
        (Locale::PtBr, AnalysisStatus::Processing) => "Processando",
        (Locale::PtBr, AnalysisStatus::Completed) => "Concluído",
        (Locale::PtBr, AnalysisStatus::Failed) => "Falhou",
        (Locale::En, AnalysisStatus::Pending) => "Pending",
        (Locale::En, AnalysisStatus::Processing) => "Processing",
        (Locale::En, AnalysisStatus::Completed) => "Completed",
        (Locale::En, AnalysisStatus::Failed) => "Failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("pt-BR"), Some(Locale::PtBr));
        assert_eq!(Locale::from_tag("pt"), Some(Locale::PtBr));
        assert_eq!(Locale::from_tag("en_US"), Some(Locale::En));
        assert_eq!(Locale::from_tag("EN"), Some(Locale::En));
        assert_eq!(Locale::from_tag("de"), None);
    }

    #[test]
    fn test_default_locale_is_portuguese() {
        assert_eq!(Message::ConnectionError.text(Locale::default()), "Erro de conexão");
    }
}
