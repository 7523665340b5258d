pub mod edf;
