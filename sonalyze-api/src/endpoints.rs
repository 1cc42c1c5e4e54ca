use sonalyze_core::AudioId;

/// Absolute URLs for every backend route, rooted at a base such as
/// `https://sonalyze.example.com`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn my_uploads(&self, page: u32, per_page: u32) -> String {
        format!("{}/api/my-uploads?page={page}&per_page={per_page}", self.base)
    }

    pub fn stats(&self) -> String {
        format!("{}/api/stats", self.base)
    }

    pub fn upload(&self) -> String {
        format!("{}/api/upload", self.base)
    }

    pub fn audio(&self, id: AudioId) -> String {
        format!("{}/api/audio/{id}", self.base)
    }

    pub fn reanalyze(&self, id: AudioId) -> String {
        format!("{}/reanalyze", self.audio(id))
    }

    pub fn transcription(&self, id: AudioId) -> String {
        format!("{}/transcription", self.audio(id))
    }

    pub fn transcription_pdf(&self, id: AudioId) -> String {
        format!("{}/transcription/pdf", self.audio(id))
    }

    pub fn download(&self, id: AudioId) -> String {
        format!("{}/download", self.audio(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let ep = Endpoints::new("http://localhost:5000/");
        assert_eq!(ep.base(), "http://localhost:5000");
        assert_eq!(
            ep.my_uploads(2, 10),
            "http://localhost:5000/api/my-uploads?page=2&per_page=10"
        );
        assert_eq!(ep.stats(), "http://localhost:5000/api/stats");
        assert_eq!(ep.upload(), "http://localhost:5000/api/upload");
        assert_eq!(ep.audio(5), "http://localhost:5000/api/audio/5");
        assert_eq!(ep.reanalyze(5), "http://localhost:5000/api/audio/5/reanalyze");
        assert_eq!(ep.transcription(5), "http://localhost:5000/api/audio/5/transcription");
        assert_eq!(
            ep.transcription_pdf(5),
            "http://localhost:5000/api/audio/5/transcription/pdf"
        );
        assert_eq!(ep.download(5), "http://localhost:5000/api/audio/5/download");
    }
}
