use url::Url;

use super::FetchError;

const METRICS_PATH: &str = "climate_prediction_algo";
const INSIGHT_PATH: &str = "gemini";

/// URL builder rooted at the configured server base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is used as-is apart from trailing slashes, e.g. `http://host:8000`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/climate_prediction_algo?country=all`
    pub fn all_countries(&self) -> Result<String, FetchError> {
        let mut url = self.join(METRICS_PATH)?;
        url.query_pairs_mut().append_pair("country", "all");
        Ok(url.into())
    }

    /// `{base}/gemini?text=<prompt>` with the whole prompt percent-encoded.
    pub fn insight(&self, prompt: &str) -> Result<String, FetchError> {
        let mut url = self.join(INSIGHT_PATH)?;
        url.query_pairs_mut().append_pair("text", prompt);
        Ok(url.into())
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!("{}/{path}", self.base))?)
    }
}
