pub mod mif;
