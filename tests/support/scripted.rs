use std::sync::{
    Arc, Mutex,
    mpsc::{self, Receiver, Sender},
};

use carbonflo::climate_api::{ClimateApi, Endpoints, FetchError, TextFetcher, TextRequest};

pub const BASE_URL: &str = "http://scripted.test";

struct Rule {
    needle: String,
    reply: Result<String, String>,
    gate: Option<Mutex<Receiver<()>>>,
}

/// In-memory fetcher answering by URL substring; gated replies wait for `release`.
#[derive(Default)]
pub struct ScriptedFetcher {
    rules: Mutex<Vec<Rule>>,
    requests: Mutex<Vec<TextRequest>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, needle: &str, body: &str) {
        self.push(needle, Ok(body.to_string()), None);
    }

    pub fn fail(&self, needle: &str, message: &str) {
        self.push(needle, Err(message.to_string()), None);
    }

    /// Reply with `body` only once the returned sender fires (or is dropped).
    pub fn reply_gated(&self, needle: &str, body: &str) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.push(needle, Ok(body.to_string()), Some(Mutex::new(rx)));
        tx
    }

    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn insight_requests(&self) -> Vec<TextRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.contains("/gemini?"))
            .collect()
    }

    fn push(
        &self,
        needle: &str,
        reply: Result<String, String>,
        gate: Option<Mutex<Receiver<()>>>,
    ) {
        self.rules.lock().unwrap().push(Rule {
            needle: needle.to_string(),
            reply,
            gate,
        });
    }
}

impl TextFetcher for ScriptedFetcher {
    fn fetch_text(&self, request: &TextRequest) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        let rule = {
            let mut rules = self.rules.lock().unwrap();
            let position = rules
                .iter()
                .position(|rule| request.url.contains(&rule.needle))
                .ok_or_else(|| FetchError::Transport(format!("no script for {}", request.url)))?;
            rules.remove(position)
        };
        if let Some(gate) = &rule.gate {
            let _ = gate.lock().unwrap().recv();
        }
        rule.reply.map_err(FetchError::Transport)
    }
}

pub fn api(fetcher: &Arc<ScriptedFetcher>) -> ClimateApi {
    ClimateApi::new(fetcher.clone(), Endpoints::new(BASE_URL))
}

pub const THREE_COUNTRIES: &str = r#"{
    "Norway": {"likelihood": 88, "year": 2035},
    "Brazil": {"likelihood": 41.5, "year": 2060},
    "Gambia": {"likelihood": 97, "year": "NOW"}
}"#;
