use crate::core::markup::Document;
use crate::core::stats::synthesize;
use crate::core::universe::resolve_universe;
use crate::domain::model::{Character, Group};
use rand::Rng;
use url::Url;

pub const MEMBER_LINK_CLASS: &str = "category-page__member-link";
pub const MEMBER_CLASS: &str = "category-page__member";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const UNKNOWN_HERO: &str = "Unknown";

pub const DEFAULT_IMAGE_PROXY: &str = "https://images.weserv.nl/";
pub const DEFAULT_IMAGE_HOST: &str = "fandom.com";

/// Ordered classification rules; the first rule with a matching substring wins.
const GROUP_RULES: &[(&[&str], Group)] = &[
    (&["Peni", "Anime"], Group::Anime),
    (&["Game", "PS"], Group::Games),
];

/// Demonstration roster used when a page yields no members.
const FALLBACK_ROSTER: &[(&str, &str, Group, &str)] = &[
    ("Miles Morales", "Earth-1610", Group::Cartoons, "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=400"),
    ("Peter B. Parker", "Earth-616B", Group::Cartoons, "https://images.unsplash.com/photo-1608889335941-32ac5f2041b9?w=400"),
    ("Gwen Stacy (Spider-Gwen)", "Earth-65", Group::Cartoons, "https://images.unsplash.com/photo-1531259683007-016a7b628fc3?w=400"),
    ("Spider-Man Noir", "Earth-90214", Group::Cartoons, "https://images.unsplash.com/photo-1509347528160-9a9e33742cdb?w=400"),
    ("Peni Parker", "Earth-14512", Group::Anime, "https://images.unsplash.com/photo-1578632767115-351597cf2477?w=400"),
    ("Spider-Ham (Peter Porker)", "Earth-8311", Group::Cartoons, "https://images.unsplash.com/photo-1548550023-2bdb3c5beed7?w=400"),
    ("Miguel O'Hara (Spider-Man 2099)", "Earth-928", Group::Cartoons, "https://images.unsplash.com/photo-1608889476561-6242cfdbf622?w=400"),
    ("Jessica Drew (Spider-Woman)", "Earth-404", Group::Cartoons, "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?w=400"),
    ("Hobie Brown (Spider-Punk)", "Earth-138", Group::Cartoons, "https://images.unsplash.com/photo-1534809027769-b00d750a6bac?w=400"),
    ("Pavitr Prabhakar", "Earth-50101", Group::Cartoons, "https://images.unsplash.com/photo-1566616213894-2d4e1baee5d8?w=400"),
    ("Ben Reilly (Scarlet Spider)", "Earth-94", Group::Cartoons, "https://images.unsplash.com/photo-1608889825103-eb5ed706fc64?w=400"),
    ("Cindy Moon (Silk)", "Earth-616", Group::Cartoons, "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400"),
];

pub fn classify_group(hero_name: &str) -> Group {
    GROUP_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| hero_name.contains(n)))
        .map(|(_, group)| *group)
        .unwrap_or_default()
}

/// How wiki-hosted thumbnails are routed through the resizing proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRewrite {
    pub proxy_endpoint: String,
    /// Hosts (and their subdomains) whose images get proxied.
    pub hosts: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub fit: String,
}

impl Default for ImageRewrite {
    fn default() -> Self {
        Self {
            proxy_endpoint: DEFAULT_IMAGE_PROXY.to_string(),
            hosts: vec![DEFAULT_IMAGE_HOST.to_string()],
            width: 400,
            height: 600,
            fit: "cover".to_string(),
        }
    }
}

impl ImageRewrite {
    pub fn matches_host(&self, image_url: &str) -> bool {
        let absolute = if image_url.starts_with("//") {
            format!("https:{}", image_url)
        } else {
            image_url.to_string()
        };

        let Some(host) = Url::parse(&absolute)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        else {
            return false;
        };

        self.hosts.iter().any(|wiki_host| {
            let wiki_host = wiki_host.to_ascii_lowercase();
            host == wiki_host || host.ends_with(&format!(".{}", wiki_host))
        })
    }

    /// Final image URL for a record: proxied, verbatim, or the placeholder.
    pub fn resolve(&self, candidate: Option<&str>) -> String {
        match candidate.map(str::trim).filter(|url| !url.is_empty()) {
            None => PLACEHOLDER_IMAGE.to_string(),
            Some(url) if self.matches_host(url) => self.rewrite(url),
            Some(url) => url.to_string(),
        }
    }

    fn rewrite(&self, image_url: &str) -> String {
        let without_query = image_url.split('?').next().unwrap_or(image_url);
        format!(
            "{}?url={}&w={}&h={}&fit={}",
            self.proxy_endpoint,
            urlencoding::encode(without_query),
            self.width,
            self.height,
            self.fit
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    image_rewrite: ImageRewrite,
}

impl Extractor {
    pub fn new(image_rewrite: ImageRewrite) -> Self {
        Self { image_rewrite }
    }

    /// Parses a category page into a record batch.
    ///
    /// Never fails: a page without category members yields the fallback
    /// roster, and missing names or images degrade per record.
    pub fn extract<R: Rng + ?Sized>(&self, markup: &str, rng: &mut R) -> Vec<Character> {
        let doc = Document::parse(markup);
        let links = doc.elements_with_class(MEMBER_LINK_CLASS);

        if links.is_empty() {
            tracing::warn!("No category members found in page, using fallback roster");
            return fallback_batch(rng);
        }

        let members = doc.elements_with_class(MEMBER_CLASS);
        tracing::debug!(
            "Found {} member links in {} member containers",
            links.len(),
            members.len()
        );

        links
            .iter()
            .enumerate()
            .map(|(position, link)| {
                let text = doc.text_content(link);
                let hero_name = match text.trim() {
                    "" => UNKNOWN_HERO.to_string(),
                    name => name.to_string(),
                };

                let candidate = doc
                    .closest(&members, link)
                    .and_then(|member| doc.first_descendant(member, "img"))
                    .and_then(|img| {
                        non_empty(img.attr("data-src")).or_else(|| non_empty(img.attr("src")))
                    });

                Character {
                    index: position as u32 + 1,
                    display_name: resolve_universe(&hero_name, position),
                    group: classify_group(&hero_name),
                    image_url: self.image_rewrite.resolve(candidate),
                    stats: Some(synthesize(rng)),
                    hero_name,
                }
            })
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The fixed twelve-record demonstration batch, with fresh stats.
pub fn fallback_batch<R: Rng + ?Sized>(rng: &mut R) -> Vec<Character> {
    FALLBACK_ROSTER
        .iter()
        .enumerate()
        .map(|(position, (hero, universe, group, image))| Character {
            index: position as u32 + 1,
            display_name: (*universe).to_string(),
            hero_name: (*hero).to_string(),
            image_url: (*image).to_string(),
            group: *group,
            stats: Some(synthesize(rng)),
        })
        .collect()
}
