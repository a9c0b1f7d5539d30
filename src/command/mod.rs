pub mod localize;
