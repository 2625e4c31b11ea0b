//! Wall clock for debounce deadlines and slider domains.

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
pub fn current_year() -> u64 {
    js_sys::Date::new_0().get_full_year() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_year() -> u64 {
    const MS_PER_YEAR: u64 = 31_556_952_000;
    1970 + now_ms() / MS_PER_YEAR
}
