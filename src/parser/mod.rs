pub mod animation_attrs;
pub mod clip_paths;
pub mod document;
pub mod dom;
pub mod instantiate;
pub mod number;
pub mod transform_attr;
pub mod use_directives;
pub mod viewbox;
