//! Transcript statistics.
//!
//! [`TranscriptStats`] summarizes an assembled transcript for the CLI
//! summary block.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::message::Transcript;

/// Summary statistics of an assembled transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    /// Number of messages in the transcript
    pub message_count: usize,
    /// Timestamp of the first message in file order
    pub first_timestamp: Option<NaiveDateTime>,
    /// Timestamp of the last message in file order
    pub last_timestamp: Option<NaiveDateTime>,
    /// Message count per sender, in order of first appearance
    pub per_sender: Vec<(String, usize)>,
}

impl TranscriptStats {
    /// Computes statistics in a single pass over the transcript.
    ///
    /// First and last timestamps are taken by position, not by value:
    /// the transcript keeps arrival order.
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let mut per_sender: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for message in transcript {
            match index.get(message.sender.as_str()) {
                Some(&slot) => per_sender[slot].1 += 1,
                None => {
                    index.insert(message.sender.as_str(), per_sender.len());
                    per_sender.push((message.sender.clone(), 1));
                }
            }
        }

        Self {
            message_count: transcript.len(),
            first_timestamp: transcript.messages().first().map(|m| m.timestamp),
            last_timestamp: transcript.messages().last().map(|m| m.timestamp),
            per_sender,
        }
    }

    pub fn sender_count(&self) -> usize {
        self.per_sender.len()
    }

    /// Returns the sender with the most messages; ties go to whoever spoke first.
    pub fn most_active_sender(&self) -> Option<(&str, usize)> {
        self.per_sender
            .iter()
            .rev()
            .max_by_key(|(_, count)| *count)
            .map(|(sender, count)| (sender.as_str(), *count))
    }
}
