#[cfg(test)]
mod debounce_coalescing;
