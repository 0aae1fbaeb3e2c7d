pub mod dna;
