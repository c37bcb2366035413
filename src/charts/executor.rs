use std::panic::AssertUnwindSafe;

use super::error::ChartRenderError;

/// Chart rendering is CPU-bound; run it off the async runtime and keep a
/// render panic from tearing the pipeline down without a diagnosis.
pub(crate) async fn run_render_task<F>(render: F) -> Result<Vec<u8>, ChartRenderError>
where
    F: FnOnce() -> Result<Vec<u8>, ChartRenderError> + Send + 'static,
{
    let render_handle = tokio::task::spawn_blocking(move || {
        std::panic::catch_unwind(AssertUnwindSafe(render))
            .map_err(|panic_payload| ChartRenderError::Panic(describe_panic_payload(panic_payload)))?
    });

    match render_handle.await {
        Ok(inner_result) => inner_result,
        Err(join_error) => Err(ChartRenderError::Join(join_error.to_string())),
    }
}

fn describe_panic_payload(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }

    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }

    "unknown panic payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::run_render_task;
    use crate::charts::error::ChartRenderError;

    #[tokio::test]
    async fn returns_the_closure_result() {
        let result = run_render_task(|| Ok(vec![1, 2, 3])).await;
        assert_eq!(result.expect("render succeeds"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn contains_a_render_panic() {
        let result = run_render_task(|| panic!("boom")).await;
        assert!(matches!(result, Err(ChartRenderError::Panic(message)) if message == "boom"));
    }
}
