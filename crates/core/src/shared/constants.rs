/// Dimensionality of the face embeddings produced by the embedder (MobileFaceNet).
pub const EMBEDDING_SIZE: usize = 192;

/// General-purpose similarity threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Fewer different-person merges, more splitting of the same person.
pub const STRICT_THRESHOLD: f32 = 0.7;

/// Fewer splits of the same person, more different-person merges.
pub const LENIENT_THRESHOLD: f32 = 0.5;
