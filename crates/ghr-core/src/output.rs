//! Posting policy for result lists

use tracing::debug;

use crate::command::Channel;
use crate::Result;

/// Post formatted items to a channel
///
/// Fewer than `threshold` items are joined with `separator` into a single
/// message; otherwise every item is posted on its own, in order. A threshold
/// of zero always posts items separately.
pub async fn post_items(
    channel: &dyn Channel,
    items: &[String],
    threshold: usize,
    separator: &str,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    if items.len() < threshold {
        debug!("Posting {} items as one message", items.len());
        return channel.say(&items.join(separator), None).await;
    }

    debug!("Posting {} items separately", items.len());
    for item in items {
        channel.say(item, None).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChannel {
        said: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        async fn say(&self, text: &str, _to: Option<&str>) -> Result<()> {
            self.said.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("item{}", i)).collect()
    }

    #[tokio::test]
    async fn test_below_threshold_joins() {
        let channel = RecordingChannel::default();
        post_items(&channel, &items(3), 4, " | ").await.unwrap();

        assert_eq!(
            channel.said.lock().unwrap().as_slice(),
            &["item1 | item2 | item3".to_string()]
        );
    }

    #[tokio::test]
    async fn test_at_threshold_posts_separately() {
        let channel = RecordingChannel::default();
        post_items(&channel, &items(3), 3, " | ").await.unwrap();

        assert_eq!(channel.said.lock().unwrap().as_slice(), items(3).as_slice());
    }

    #[tokio::test]
    async fn test_zero_threshold_posts_separately() {
        let channel = RecordingChannel::default();
        post_items(&channel, &items(1), 0, ", ").await.unwrap();

        assert_eq!(channel.said.lock().unwrap().as_slice(), &["item1".to_string()]);
    }

    #[test]
    fn test_empty_items_posts_nothing() {
        let channel = RecordingChannel::default();
        tokio_test::block_on(post_items(&channel, &[], 10, ", ")).unwrap();
        assert!(channel.said.lock().unwrap().is_empty());
    }
}
