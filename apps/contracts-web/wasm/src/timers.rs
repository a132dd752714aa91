//! `setTimeout`-backed timers

use dashboard_core::{Scheduler, Task};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn millis(delay: Duration) -> i32 {
    delay.as_millis().min(i32::MAX as u128) as i32
}

/// Runs each task from a one-shot `window.setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let Some(window) = web_sys::window() else {
            web_sys::console::warn_1(&"No window, timer dropped".into());
            return;
        };
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis(delay),
        ) {
            web_sys::console::error_2(&"setTimeout failed".into(), &e);
        }
    }
}

/// Resolve after `delay`
pub async fn sleep(delay: Duration) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis(delay))
        {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await?;
    Ok(())
}
