// Near-duplicate detection: TF-IDF vectors, cosine similarity, clustering.

pub mod cluster;
pub mod similarity;
pub mod tokenize;
pub mod vectorize;
