#[cfg(test)]
mod tests {
    use crate::continuation::continuation;
    use std::thread;

    #[tokio::test]
    async fn test_resume_delivers_value() {
        let (waiting, resumption) = continuation();
        assert!(!resumption.is_resumed());
        resumption.resume(7);
        assert!(resumption.is_resumed());
        assert_eq!(waiting.wait("fetch").await, 7);
    }

    #[tokio::test]
    async fn test_only_first_resume_counts() {
        let (waiting, resumption) = continuation();
        resumption.resume("first");
        resumption.resume("second");
        assert_eq!(waiting.wait("fetch").await, "first");
    }

    #[tokio::test]
    async fn test_resume_from_another_thread() {
        let (waiting, resumption) = continuation::<String>();
        let worker = thread::spawn(move || resumption.resume("done".to_string()));
        assert_eq!(waiting.wait("fetch").await, "done");
        worker.join().unwrap();
    }

    #[tokio::test]
    #[should_panic(expected = "`fetch` dropped its completion handler without calling it")]
    async fn test_dropped_resumption_panics() {
        let (waiting, resumption) = continuation::<()>();
        drop(resumption);
        waiting.wait("fetch").await;
    }

    #[test]
    fn test_resume_after_waiter_dropped_is_harmless() {
        let (waiting, resumption) = continuation();
        drop(waiting);
        resumption.resume(1);
        assert!(resumption.is_resumed());
    }
}
