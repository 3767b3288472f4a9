use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

/// A single catalog entry. Records are immutable once constructed; view and
/// upload counts are display strings, like/dislike counts are numeric so the
/// player view can show a viewer's own like on top.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel: String,
    pub channel_id: String,
    pub channel_avatar: String,
    pub views: String,
    pub upload_time: String,
    pub duration: String,
    pub likes: i64,
    pub dislikes: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub subscribers: String,
    pub video_count: usize,
}

pub trait CatalogService: Send + Sync {
    /// The whole catalog, in upload order.
    fn list_videos(&self) -> Result<Vec<VideoRecord>>;
    /// Every video belonging to one channel, catalog order preserved.
    fn channel_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>>;
    /// Videos to surface next to an open one. Never contains the current
    /// video.
    fn recommended(&self, current_id: &str, limit: usize) -> Result<Vec<VideoRecord>>;
    fn channel_summary(&self, channel_id: &str) -> Result<Option<ChannelSummary>>;
}

pub struct MockCatalogService {
    videos: Vec<VideoRecord>,
    shuffle_recommended: bool,
}

impl MockCatalogService {
    pub fn new(shuffle_recommended: bool) -> Self {
        Self {
            videos: FIXTURE_VIDEOS.clone(),
            shuffle_recommended,
        }
    }

    pub fn with_videos(videos: Vec<VideoRecord>, shuffle_recommended: bool) -> Self {
        Self {
            videos,
            shuffle_recommended,
        }
    }
}

impl CatalogService for MockCatalogService {
    fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        Ok(self.videos.clone())
    }

    fn channel_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>> {
        Ok(self
            .videos
            .iter()
            .filter(|video| video.channel_id == channel_id)
            .cloned()
            .collect())
    }

    fn recommended(&self, current_id: &str, limit: usize) -> Result<Vec<VideoRecord>> {
        let mut others: Vec<VideoRecord> = self
            .videos
            .iter()
            .filter(|video| video.id != current_id)
            .cloned()
            .collect();
        if self.shuffle_recommended {
            others.shuffle(&mut rand::thread_rng());
        }
        others.truncate(limit);
        Ok(others)
    }

    fn channel_summary(&self, channel_id: &str) -> Result<Option<ChannelSummary>> {
        let videos = self.channel_videos(channel_id)?;
        Ok(videos.first().map(|first| ChannelSummary {
            id: channel_id.to_string(),
            name: first.channel.clone(),
            avatar: first.channel_avatar.clone(),
            subscribers: channel_subscribers(channel_id).to_string(),
            video_count: videos.len(),
        }))
    }
}

fn channel_subscribers(channel_id: &str) -> &'static str {
    match channel_id {
        "webdev-pro" => "1.2M",
        "code-masters" => "890K",
        "design-academy" => "450K",
        "ai-learning" => "2.1M",
        "css-wizards" => "760K",
        "backend-hub" => "1.5M",
        _ => "1.2M",
    }
}

/// Fuzzy-filters the given records by title or channel name, best match
/// first. A blank query keeps the catalog order untouched.
pub fn search_videos(query: &str, videos: &[VideoRecord]) -> Vec<VideoRecord> {
    let query = query.trim();
    if query.is_empty() {
        return videos.to_vec();
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &VideoRecord)> = videos
        .iter()
        .filter_map(|video| {
            let title = matcher.fuzzy_match(&video.title, query);
            let channel = matcher.fuzzy_match(&video.channel, query);
            title.max(channel).map(|score| (score, video))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, video)| video.clone()).collect()
}

static FIXTURE_VIDEOS: Lazy<Vec<VideoRecord>> = Lazy::new(|| {
    vec![
        fixture(
            "1",
            "Building a Modern Web App with React",
            "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800",
            "WebDev Pro",
            "webdev-pro",
            "234K",
            "2 days ago",
            "15:32",
            12_000,
            180,
            "A walkthrough of building a modern web application with React, TypeScript and today's tooling.",
        ),
        fixture(
            "2",
            "Top 10 Performance Optimization Tips",
            "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800",
            "Code Masters",
            "code-masters",
            "156K",
            "5 days ago",
            "22:45",
            8_500,
            140,
            "Best practices for squeezing more performance out of web applications.",
        ),
        fixture(
            "3",
            "Design Systems from Scratch: The Complete Guide",
            "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=800",
            "Design Academy",
            "design-academy",
            "89K",
            "1 week ago",
            "18:20",
            5_200,
            95,
            "Building a design system for your project with proper components and tokens.",
        ),
        fixture(
            "4",
            "AI and Machine Learning: A Beginner's Introduction",
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800",
            "AI Learning",
            "ai-learning",
            "412K",
            "3 days ago",
            "25:10",
            18_000,
            320,
            "A gentle introduction to the world of artificial intelligence and machine learning.",
        ),
        fixture(
            "5",
            "Advanced CSS Techniques: Grid and Flexbox",
            "https://images.unsplash.com/photo-1523437113738-bbd3cc89fb19?w=800",
            "CSS Wizards",
            "css-wizards",
            "178K",
            "1 day ago",
            "20:15",
            9_800,
            150,
            "A masterclass on CSS Grid and Flexbox for building modern layouts.",
        ),
        fixture(
            "6",
            "Backend Development with Node.js and Express",
            "https://images.unsplash.com/photo-1627398242454-45a1465c2479?w=800",
            "Backend Hub",
            "backend-hub",
            "267K",
            "4 days ago",
            "30:45",
            14_000,
            210,
            "A full course on building backend applications with Node.js and Express.",
        ),
        fixture(
            "7",
            "TypeScript Patterns Every React Developer Should Know",
            "https://images.unsplash.com/photo-1587620962725-abab7fe55159?w=800",
            "WebDev Pro",
            "webdev-pro",
            "121K",
            "2 weeks ago",
            "17:05",
            7_300,
            110,
            "Practical TypeScript patterns that make React codebases easier to grow.",
        ),
        fixture(
            "8",
            "Profiling and Debugging Slow Web Pages",
            "https://images.unsplash.com/photo-1504639725590-34d0984388bd?w=800",
            "Code Masters",
            "code-masters",
            "98K",
            "3 weeks ago",
            "19:40",
            6_100,
            88,
            "Finding and fixing the bottlenecks that make pages feel sluggish.",
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    title: &str,
    thumbnail: &str,
    channel: &str,
    channel_id: &str,
    views: &str,
    upload_time: &str,
    duration: &str,
    likes: i64,
    dislikes: i64,
    description: &str,
) -> VideoRecord {
    VideoRecord {
        id: id.into(),
        title: title.into(),
        thumbnail: thumbnail.into(),
        channel: channel.into(),
        channel_id: channel_id.into(),
        channel_avatar: String::new(),
        views: views.into(),
        upload_time: upload_time.into(),
        duration: duration.into(),
        likes,
        dislikes,
        description: description.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, channel_id: &str) -> VideoRecord {
        fixture(
            id,
            &format!("Video {id}"),
            "",
            &format!("Channel {channel_id}"),
            channel_id,
            "1K",
            "today",
            "1:00",
            10,
            1,
            "",
        )
    }

    #[test]
    fn channel_videos_filters_by_equality_preserving_order() {
        let service = MockCatalogService::with_videos(
            vec![sample("1", "a"), sample("2", "a"), sample("3", "b")],
            false,
        );
        let videos = service.channel_videos("a").unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "1");
        assert_eq!(videos[1].id, "2");
    }

    #[test]
    fn recommended_excludes_current_and_honors_limit() {
        let service = MockCatalogService::new(false);
        let recommended = service.recommended("1", 3).unwrap();
        assert_eq!(recommended.len(), 3);
        assert!(recommended.iter().all(|video| video.id != "1"));
    }

    #[test]
    fn channel_summary_counts_videos() {
        let service = MockCatalogService::new(false);
        let summary = service.channel_summary("webdev-pro").unwrap().unwrap();
        assert_eq!(summary.name, "WebDev Pro");
        assert_eq!(summary.video_count, 2);
        assert!(service.channel_summary("no-such").unwrap().is_none());
    }

    #[test]
    fn search_matches_title_and_channel() {
        let service = MockCatalogService::new(false);
        let videos = service.list_videos().unwrap();

        let by_title = search_videos("css grid", &videos);
        assert_eq!(by_title[0].id, "5");

        let by_channel = search_videos("backend hub", &videos);
        assert!(by_channel.iter().any(|video| video.channel_id == "backend-hub"));

        let blank = search_videos("   ", &videos);
        assert_eq!(blank.len(), videos.len());
        assert_eq!(blank[0].id, "1");
    }
}
