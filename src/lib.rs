#![doc = include_str!("../README.md")]

pub mod address;
pub mod bedrock;
pub mod connection;
pub mod error;
pub mod java;
pub mod mc_text;

pub use address::ServerAddress;
pub use bedrock::{
    BEDROCK_DEFAULT_PORT, BedrockEdition, BedrockPlayers, BedrockServer, BedrockStatus,
    BedrockVersion,
};
pub use connection::{API_BASE_URL, DEFAULT_TIMEOUT, Edition, MAX_TIMEOUT};
pub use error::{Error, Result};
pub use java::{
    JAVA_DEFAULT_PORT, JavaPlayers, JavaServer, JavaStatus, JavaVersion, Mod, Plugin, SrvRecord,
};
pub use mc_text::{FormattedText, Motd, Player};
