pub mod debounce;
pub mod dom;
pub mod fade;
