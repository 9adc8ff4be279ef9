use parking_lot::Mutex;
use ticket_resolver_core::{Feedback, FeedbackSink};

#[derive(Default)]
pub struct RecordingFeedbackSink {
    records: Mutex<Vec<Feedback>>,
}

impl RecordingFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Feedback> {
        self.records.lock().clone()
    }
}

impl FeedbackSink for RecordingFeedbackSink {
    fn record(&self, feedback: &Feedback) {
        self.records.lock().push(feedback.clone());
    }
}
