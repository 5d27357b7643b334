//! Face embedding clustering.
//!
//! Groups detected faces into per-person clusters by cosine similarity of
//! their embeddings, and summarizes the result for export. Detection,
//! cropping and embedding inference are collaborator traits implemented
//! outside this crate.

pub mod clustering {
    pub mod domain {
        pub mod cluster;
        pub mod clustering_summary;
        pub mod face_clusterer;
        pub mod face_record;
        pub mod similarity;
    }
}

pub mod detection {
    pub mod domain {
        pub mod face_cropper;
        pub mod face_detector;
    }
}

pub mod embedding {
    pub mod domain {
        pub mod face_embedder;
    }
}

pub mod pipeline {
    pub mod cluster_faces_use_case;
    pub mod clustering_event;
    pub mod image_source;
    pub mod infrastructure;
}

pub mod shared {
    pub mod bounding_box;
    pub mod constants;
    pub mod frame;
}
