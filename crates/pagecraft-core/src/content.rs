//! Typed content payloads, one per element type.

use crate::element::ElementKind;
use crate::error::ModelError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
}

/// HTML heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingContent {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonContent {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoContent {
    pub url: String,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconContent {
    pub icon_type: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderContent {
    pub logo: String,
    pub menu_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterContent {
    pub copyright: String,
    pub columns: Vec<FooterColumn>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarContent {
    pub brand: String,
    pub items: Vec<String>,
    pub cta_text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub secondary_cta_text: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardContent {
    pub image: String,
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub badge: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridItem {
    pub title: String,
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridContent {
    pub columns: u32,
    pub gap: f64,
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialContent {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar: String,
    /// Star rating, 0 to 5.
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingContent {
    pub title: String,
    pub price: String,
    pub currency: String,
    pub period: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamSocial {
    pub linkedin: String,
    pub twitter: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamContent {
    pub image: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub social: TeamSocial,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaContent {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub secondary_text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactItem {
    pub icon: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactContent {
    pub title: String,
    pub items: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatItem {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsContent {
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesContent {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureItem>,
}

/// Marker style for list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    Bullet,
    Number,
    Check,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListContent {
    pub title: String,
    pub items: Vec<String>,
    pub style: ListStyle,
}

/// Type-dependent payload of an element.
///
/// The variant determines the element's [`ElementKind`]. Layout-only types
/// (divider, container, section) carry no content.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Text(TextContent),
    Heading(HeadingContent),
    Button(ButtonContent),
    Image(ImageContent),
    Video(VideoContent),
    Icon(IconContent),
    Divider,
    Container,
    Section,
    Header(HeaderContent),
    Footer(FooterContent),
    Navbar(NavbarContent),
    Hero(HeroContent),
    Card(CardContent),
    Grid(GridContent),
    Testimonial(TestimonialContent),
    Pricing(PricingContent),
    Team(TeamContent),
    Cta(CtaContent),
    Contact(ContactContent),
    Stats(StatsContent),
    Features(FeaturesContent),
    List(ListContent),
}

fn parse<T: DeserializeOwned>(kind: ElementKind, value: serde_json::Value) -> Result<T, ModelError> {
    // Missing payloads are persisted as null; treat them as all-default.
    let value = if value.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        value
    };
    serde_json::from_value(value).map_err(|source| ModelError::InvalidContent { kind, source })
}

impl ElementContent {
    /// The element type this payload belongs to.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Heading(_) => ElementKind::Heading,
            ElementContent::Button(_) => ElementKind::Button,
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Video(_) => ElementKind::Video,
            ElementContent::Icon(_) => ElementKind::Icon,
            ElementContent::Divider => ElementKind::Divider,
            ElementContent::Container => ElementKind::Container,
            ElementContent::Section => ElementKind::Section,
            ElementContent::Header(_) => ElementKind::Header,
            ElementContent::Footer(_) => ElementKind::Footer,
            ElementContent::Navbar(_) => ElementKind::Navbar,
            ElementContent::Hero(_) => ElementKind::Hero,
            ElementContent::Card(_) => ElementKind::Card,
            ElementContent::Grid(_) => ElementKind::Grid,
            ElementContent::Testimonial(_) => ElementKind::Testimonial,
            ElementContent::Pricing(_) => ElementKind::Pricing,
            ElementContent::Team(_) => ElementKind::Team,
            ElementContent::Cta(_) => ElementKind::Cta,
            ElementContent::Contact(_) => ElementKind::Contact,
            ElementContent::Stats(_) => ElementKind::Stats,
            ElementContent::Features(_) => ElementKind::Features,
            ElementContent::List(_) => ElementKind::List,
        }
    }

    /// Empty payload of the given type.
    pub fn empty(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => ElementContent::Text(TextContent::default()),
            ElementKind::Heading => ElementContent::Heading(HeadingContent::default()),
            ElementKind::Button => ElementContent::Button(ButtonContent::default()),
            ElementKind::Image => ElementContent::Image(ImageContent::default()),
            ElementKind::Video => ElementContent::Video(VideoContent::default()),
            ElementKind::Icon => ElementContent::Icon(IconContent::default()),
            ElementKind::Divider => ElementContent::Divider,
            ElementKind::Container => ElementContent::Container,
            ElementKind::Section => ElementContent::Section,
            ElementKind::Header => ElementContent::Header(HeaderContent::default()),
            ElementKind::Footer => ElementContent::Footer(FooterContent::default()),
            ElementKind::Navbar => ElementContent::Navbar(NavbarContent::default()),
            ElementKind::Hero => ElementContent::Hero(HeroContent::default()),
            ElementKind::Card => ElementContent::Card(CardContent::default()),
            ElementKind::Grid => ElementContent::Grid(GridContent::default()),
            ElementKind::Testimonial => ElementContent::Testimonial(TestimonialContent::default()),
            ElementKind::Pricing => ElementContent::Pricing(PricingContent::default()),
            ElementKind::Team => ElementContent::Team(TeamContent::default()),
            ElementKind::Cta => ElementContent::Cta(CtaContent::default()),
            ElementKind::Contact => ElementContent::Contact(ContactContent::default()),
            ElementKind::Stats => ElementContent::Stats(StatsContent::default()),
            ElementKind::Features => ElementContent::Features(FeaturesContent::default()),
            ElementKind::List => ElementContent::List(ListContent::default()),
        }
    }

    /// Decode a persisted JSON payload for the given type.
    pub fn from_value(kind: ElementKind, value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(match kind {
            ElementKind::Text => ElementContent::Text(parse(kind, value)?),
            ElementKind::Heading => ElementContent::Heading(parse(kind, value)?),
            ElementKind::Button => ElementContent::Button(parse(kind, value)?),
            ElementKind::Image => ElementContent::Image(parse(kind, value)?),
            ElementKind::Video => ElementContent::Video(parse(kind, value)?),
            ElementKind::Icon => ElementContent::Icon(parse(kind, value)?),
            ElementKind::Divider => ElementContent::Divider,
            ElementKind::Container => ElementContent::Container,
            ElementKind::Section => ElementContent::Section,
            ElementKind::Header => ElementContent::Header(parse(kind, value)?),
            ElementKind::Footer => ElementContent::Footer(parse(kind, value)?),
            ElementKind::Navbar => ElementContent::Navbar(parse(kind, value)?),
            ElementKind::Hero => ElementContent::Hero(parse(kind, value)?),
            ElementKind::Card => ElementContent::Card(parse(kind, value)?),
            ElementKind::Grid => ElementContent::Grid(parse(kind, value)?),
            ElementKind::Testimonial => ElementContent::Testimonial(parse(kind, value)?),
            ElementKind::Pricing => ElementContent::Pricing(parse(kind, value)?),
            ElementKind::Team => ElementContent::Team(parse(kind, value)?),
            ElementKind::Cta => ElementContent::Cta(parse(kind, value)?),
            ElementKind::Contact => ElementContent::Contact(parse(kind, value)?),
            ElementKind::Stats => ElementContent::Stats(parse(kind, value)?),
            ElementKind::Features => ElementContent::Features(parse(kind, value)?),
            ElementKind::List => ElementContent::List(parse(kind, value)?),
        })
    }

    /// Encode the payload as its persisted JSON object.
    pub fn to_value(&self) -> serde_json::Value {
        let value = match self {
            ElementContent::Text(c) => serde_json::to_value(c),
            ElementContent::Heading(c) => serde_json::to_value(c),
            ElementContent::Button(c) => serde_json::to_value(c),
            ElementContent::Image(c) => serde_json::to_value(c),
            ElementContent::Video(c) => serde_json::to_value(c),
            ElementContent::Icon(c) => serde_json::to_value(c),
            ElementContent::Divider | ElementContent::Container | ElementContent::Section => {
                return serde_json::Value::Object(serde_json::Map::new());
            }
            ElementContent::Header(c) => serde_json::to_value(c),
            ElementContent::Footer(c) => serde_json::to_value(c),
            ElementContent::Navbar(c) => serde_json::to_value(c),
            ElementContent::Hero(c) => serde_json::to_value(c),
            ElementContent::Card(c) => serde_json::to_value(c),
            ElementContent::Grid(c) => serde_json::to_value(c),
            ElementContent::Testimonial(c) => serde_json::to_value(c),
            ElementContent::Pricing(c) => serde_json::to_value(c),
            ElementContent::Team(c) => serde_json::to_value(c),
            ElementContent::Cta(c) => serde_json::to_value(c),
            ElementContent::Contact(c) => serde_json::to_value(c),
            ElementContent::Stats(c) => serde_json::to_value(c),
            ElementContent::Features(c) => serde_json::to_value(c),
            ElementContent::List(c) => serde_json::to_value(c),
        };
        // Plain structs with string keys always encode.
        value.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_matches_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementContent::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn test_from_value_camel_case() {
        let content = ElementContent::from_value(
            ElementKind::Hero,
            json!({"title": "Hi", "ctaText": "Go", "secondaryCtaText": "More"}),
        )
        .unwrap();
        match content {
            ElementContent::Hero(hero) => {
                assert_eq!(hero.title, "Hi");
                assert_eq!(hero.cta_text, "Go");
                assert_eq!(hero.secondary_cta_text, "More");
                assert!(hero.image_url.is_empty());
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_null_payload_is_default() {
        let content = ElementContent::from_value(ElementKind::List, serde_json::Value::Null).unwrap();
        assert_eq!(content, ElementContent::List(ListContent::default()));
    }

    #[test]
    fn test_heading_level_and_list_style() {
        let heading = ElementContent::from_value(ElementKind::Heading, json!({"text": "T", "level": "h4"})).unwrap();
        assert_eq!(
            heading,
            ElementContent::Heading(HeadingContent { text: "T".into(), level: HeadingLevel::H4 })
        );
        let list = ElementContent::from_value(ElementKind::List, json!({"style": "check"})).unwrap();
        match list {
            ElementContent::List(l) => assert_eq!(l.style, ListStyle::Check),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let err = ElementContent::from_value(ElementKind::Grid, json!({"columns": "three"}));
        assert!(matches!(err, Err(ModelError::InvalidContent { kind: ElementKind::Grid, .. })));
    }

    #[test]
    fn test_layout_types_encode_empty_object() {
        assert_eq!(ElementContent::Section.to_value(), json!({}));
        assert_eq!(ElementContent::from_value(ElementKind::Divider, json!({"x": 1})).unwrap(), ElementContent::Divider);
    }
}
