use serde::{Deserialize, Serialize};
use crate::movie::MovieId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.job == "Director")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_official_youtube_trailer(&self) -> bool {
        self.official && self.video_type == "Trailer" && self.site == "YouTube"
    }
}

/// Where a movie can be played: an official trailer, or an embed page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamSource {
    Youtube { key: String },
    Stream { url: String },
}

const EMBED_BASE_URL: &str = "https://vidsrc.xyz/embed/movie";

impl StreamSource {
    /// First official YouTube trailer, falling back to the embed URL
    pub fn from_videos(movie_id: MovieId, videos: &[Video]) -> Self {
        match videos.iter().find(|v| v.is_official_youtube_trailer()) {
            Some(trailer) => StreamSource::Youtube { key: trailer.key.clone() },
            None => StreamSource::Stream { url: format!("{}/{}", EMBED_BASE_URL, movie_id) },
        }
    }

    pub fn url(&self) -> String {
        match self {
            StreamSource::Youtube { key } => format!("https://www.youtube.com/watch?v={}", key),
            StreamSource::Stream { url } => url.clone(),
        }
    }
}
