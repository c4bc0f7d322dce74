use crate::events::AppEvent;
use crate::mock_data::CANNED_REPLY;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Schedules the canned assistant reply after a fixed delay.
///
/// At most one reply is pending at a time. Scheduling again, calling
/// [`ReplyScheduler::cancel`] or dropping the scheduler aborts the pending
/// task, so a reply never outlives the session that asked for it.
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<AppEvent>,
    pending: Option<JoinHandle<()>>,
}

impl ReplyScheduler {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Schedule a reply for `session_id`, superseding any pending one
    pub fn schedule(&mut self, session_id: Uuid) {
        if self.cancel() {
            tracing::debug!(%session_id, "superseded pending reply");
        }

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let event = AppEvent::AssistantReply {
                session_id,
                content: CANNED_REPLY.to_string(),
            };
            if tx.send(event).is_err() {
                tracing::debug!(%session_id, "reply receiver closed");
            }
        }));
        tracing::debug!(%session_id, delay_ms = delay.as_millis() as u64, "scheduled reply");
    }

    /// Abort the pending reply; returns whether one was still running
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(1000), tx);
        let session_id = Uuid::new_v4();

        scheduler.schedule(session_id);
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            AppEvent::AssistantReply { session_id, content: CANNED_REPLY.to_string() }
        );
        tokio::task::yield_now().await;
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_supersedes_pending_reply() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(1000), tx);
        let session_id = Uuid::new_v4();

        scheduler.schedule(session_id);
        tokio::time::sleep(Duration::from_millis(600)).await;
        scheduler.schedule(session_id);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err(), "first reply should have been cancelled");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_cancels_reply() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(1000), tx);
        scheduler.schedule(Uuid::new_v4());
        drop(scheduler);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        // every sender is gone once the aborted task is dropped
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_without_pending_reply_is_a_no_op() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(10), tx);
        assert!(!scheduler.cancel());
        assert!(!scheduler.is_pending());
    }
}
