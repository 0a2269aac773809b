//! Single-shot wrapper over the browser geolocation capability.
//!
//! The callback pair `getCurrentPosition` expects is folded into one
//! promise that settles exactly once, so a check-in only ever observes a
//! single success or failure per request. The timeout in the request is
//! enforced by the browser itself and surfaces as a failure callback.

use js_sys::Promise;
use trailtag_core::{GeoPoint, LocationFailure, LocationRequest};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Geolocation, Position, PositionError, PositionOptions};

/// Whether this browser exposes a geolocation capability at all.
#[must_use]
pub fn capability_available() -> bool {
    web_sys::window()
        .map(|win| win.navigator().geolocation().is_ok())
        .unwrap_or(false)
}

fn geolocation() -> Result<Geolocation, LocationFailure> {
    crate::dom::window()
        .navigator()
        .geolocation()
        .map_err(|err| LocationFailure::new(crate::dom::js_error_message(&err)))
}

fn position_options(request: LocationRequest) -> PositionOptions {
    let options = PositionOptions::new();
    options.set_enable_high_accuracy(request.high_accuracy);
    options.set_timeout(request.timeout_ms);
    options.set_maximum_age(request.max_age_ms);
    options
}

/// Acquire one location fix under the given constraints.
///
/// # Errors
/// Returns the browser's reason text when permission is denied, the
/// request times out, or the position is unavailable.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn current_position(request: LocationRequest) -> Result<GeoPoint, LocationFailure> {
    let geolocation = geolocation()?;
    let options = position_options(request);

    let promise = Promise::new(&mut |resolve, reject| {
        let reject_on_failure = reject.clone();
        let on_fix = Closure::once(move |position: Position| {
            let _ = resolve.call1(&JsValue::UNDEFINED, &position);
        });
        let on_error = Closure::once(move |error: PositionError| {
            let _ = reject.call1(&JsValue::UNDEFINED, &error);
        });
        // A synchronous refusal must still settle the promise.
        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            on_fix.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        ) {
            let _ = reject_on_failure.call1(&JsValue::UNDEFINED, &err);
        }
        on_fix.forget();
        on_error.forget();
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: Position = value
                .dyn_into()
                .map_err(|_| LocationFailure::new("malformed position result"))?;
            let coords = position.coords();
            Ok(GeoPoint::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => {
            let reason = err
                .dyn_ref::<PositionError>()
                .map_or_else(|| crate::dom::js_error_message(&err), PositionError::message);
            Err(LocationFailure::new(reason))
        }
    }
}
