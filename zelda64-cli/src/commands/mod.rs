pub(crate) mod deflate;
pub(crate) mod inflate;
pub(crate) mod patch;
