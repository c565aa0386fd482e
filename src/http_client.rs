//! HTTP agent construction and bounded response reads.

use std::io::{self, Read};

use crate::config::NetworkSettings;

/// Build an agent with the configured timeouts.
pub(crate) fn build_agent(settings: &NetworkSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(settings.connect_timeout())
        .timeout_read(settings.read_timeout())
        .user_agent(&format!("carbonflo/{}", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
    else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    fn agent() -> ureq::Agent {
        build_agent(&NetworkSettings::default())
    }

    #[test]
    fn rejects_content_length_over_max() {
        let (url, _) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nok".to_string(),
        );
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_body_over_max() {
        let body = "a".repeat(32);
        let (url, _) = serve_once(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn accepts_body_under_limit() {
        let body = "hello";
        let (url, _) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let response = agent().get(&url).call().unwrap();
        let bytes = read_response_bytes(response, 16).unwrap();
        assert_eq!(bytes, body.as_bytes());
    }
}
