pub mod float_ext;
pub mod root_finding;
pub mod special_functions;
