use std::error::Error;

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum DNSResolverError {
    #[error("error while decoding `{0}`: `{1}`")]
    Decode(String, String),
    #[error("error while encoding `{0}`: `{1}`")]
    Encode(String, String),
    #[error("error while parsing bytes")]
    Parse,
    #[error("invalid record type: `{0}`")]
    InvalidRecordType(String),
    #[error("network failure while trying to `{0}`: {1}")]
    Network(String, String),
    #[error("{}", not_found_message(.0, .1))]
    NotFound(String, String),
}

impl DNSResolverError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DNSResolverError::NotFound(..))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, DNSResolverError::Network(..))
    }
}

pub type Result<T> = std::result::Result<T, DNSResolverError>;

fn not_found_message(record_type: &str, domain: &str) -> String {
    match record_type {
        "A" => format!("no A record returned for {domain}"),
        "CNAME" => format!("no CName records found for {domain}"),
        other => format!("no {other} records found for {domain}"),
    }
}

pub fn map_encode_err(step: &str, err: &impl Error) -> DNSResolverError {
    DNSResolverError::Encode(String::from(step), err.to_string())
}

pub fn map_network_err(op: &str, err: &impl Error) -> DNSResolverError {
    DNSResolverError::Network(String::from(op), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_the_record_type() {
        let err = DNSResolverError::NotFound(String::from("A"), String::from("example.com."));
        assert_eq!(err.to_string(), "no A record returned for example.com.");
        let err = DNSResolverError::NotFound(String::from("CNAME"), String::from("example.com."));
        assert_eq!(err.to_string(), "no CName records found for example.com.");
        assert!(err.is_not_found());
        assert!(!err.is_network());
    }
}
