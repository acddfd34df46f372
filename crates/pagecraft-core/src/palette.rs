//! Palette catalog: the element types a user can drop onto the canvas.

use crate::content::*;
use crate::element::{ElementKind, StyleMap};
use kurbo::Size;

/// One draggable palette entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteItem {
    pub kind: ElementKind,
    pub label: String,
    pub default_size: Size,
    pub default_content: ElementContent,
    pub default_styles: StyleMap,
}

impl PaletteItem {
    /// Entry with empty content and no styles.
    pub fn bare(kind: ElementKind) -> Self {
        Self {
            kind,
            label: kind.name().to_string(),
            default_size: kind.default_size(),
            default_content: ElementContent::empty(kind),
            default_styles: StyleMap::new(),
        }
    }
}

fn styles(pairs: &[(&str, &str)]) -> StyleMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const SHADOW_SM: &str = "0 1px 3px rgba(0,0,0,0.1)";
const SHADOW_MD: &str = "0 4px 6px rgba(0,0,0,0.1)";

fn item(kind: ElementKind, label: &str, content: ElementContent, style: StyleMap) -> PaletteItem {
    PaletteItem {
        kind,
        label: label.to_string(),
        default_size: kind.default_size(),
        default_content: content,
        default_styles: style,
    }
}

/// The built-in catalog, one entry per element type, in palette order.
pub fn default_catalog() -> Vec<PaletteItem> {
    ElementKind::ALL.into_iter().map(default_item).collect()
}

/// Built-in catalog entry for one type.
pub fn default_item(kind: ElementKind) -> PaletteItem {
    use ElementKind as K;
    match kind {
        K::Text => item(
            kind,
            "Text",
            ElementContent::Text(TextContent { text: "Your text here...".into() }),
            styles(&[("fontSize", "16px"), ("color", "#000"), ("lineHeight", "1.5")]),
        ),
        K::Heading => item(
            kind,
            "Heading",
            ElementContent::Heading(HeadingContent {
                text: "Heading".into(),
                level: HeadingLevel::H2,
            }),
            styles(&[("fontSize", "32px"), ("color", "#000"), ("fontWeight", "bold")]),
        ),
        K::Button => item(
            kind,
            "Button",
            ElementContent::Button(ButtonContent {
                text: "Button".into(),
                link: "#".into(),
            }),
            styles(&[
                ("backgroundColor", "#3B82F6"),
                ("color", "#fff"),
                ("borderRadius", "8px"),
                ("fontWeight", "600"),
            ]),
        ),
        K::Image => item(
            kind,
            "Image",
            ElementContent::Image(ImageContent {
                src: String::new(),
                alt: "Image".into(),
            }),
            styles(&[("borderRadius", "8px")]),
        ),
        K::Video => item(
            kind,
            "Video",
            ElementContent::Video(VideoContent::default()),
            styles(&[("borderRadius", "8px")]),
        ),
        K::Icon => item(
            kind,
            "Icon",
            ElementContent::Icon(IconContent {
                icon_type: "star".into(),
                size: 48.0,
            }),
            styles(&[("color", "#3B82F6")]),
        ),
        K::Container => item(
            kind,
            "Container",
            ElementContent::Container,
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("border", "1px solid #e5e7eb"),
                ("borderRadius", "12px"),
                ("padding", "24px"),
                ("boxShadow", SHADOW_SM),
            ]),
        ),
        K::Section => item(
            kind,
            "Section",
            ElementContent::Section,
            styles(&[("backgroundColor", "#f9fafb"), ("padding", "48px 24px")]),
        ),
        K::Divider => item(
            kind,
            "Divider",
            ElementContent::Divider,
            styles(&[("backgroundColor", "#e5e7eb"), ("margin", "32px 0")]),
        ),
        K::Header => item(
            kind,
            "Header",
            ElementContent::Header(HeaderContent {
                logo: "Logo".into(),
                menu_items: strings(&["Home", "About", "Services", "Contact"]),
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("borderBottom", "1px solid #e5e7eb"),
                ("padding", "0 48px"),
                ("display", "flex"),
                ("alignItems", "center"),
                ("justifyContent", "space-between"),
                ("boxShadow", SHADOW_SM),
            ]),
        ),
        K::Footer => item(
            kind,
            "Footer",
            ElementContent::Footer(FooterContent {
                copyright: "© 2024 All rights reserved".into(),
                columns: vec![
                    FooterColumn {
                        title: "Company".into(),
                        links: strings(&["About", "Careers", "Contact"]),
                    },
                    FooterColumn {
                        title: "Services".into(),
                        links: strings(&["Products", "Pricing", "Support"]),
                    },
                    FooterColumn {
                        title: "Resources".into(),
                        links: strings(&["Blog", "Docs", "FAQ"]),
                    },
                ],
                socials: ["Facebook", "Twitter", "LinkedIn"]
                    .into_iter()
                    .map(|name| SocialLink {
                        name: name.into(),
                        url: "#".into(),
                    })
                    .collect(),
            }),
            styles(&[
                ("backgroundColor", "#1f2937"),
                ("color", "#ffffff"),
                ("padding", "48px"),
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(3, 1fr)"),
                ("gap", "32px"),
            ]),
        ),
        K::Navbar => item(
            kind,
            "Navbar",
            ElementContent::Navbar(NavbarContent {
                brand: "Brand".into(),
                items: strings(&["Home", "Products", "Blog", "Contact"]),
                cta_text: "Get started".into(),
            }),
            styles(&[
                ("backgroundColor", "#3B82F6"),
                ("color", "#ffffff"),
                ("padding", "0 48px"),
                ("display", "flex"),
                ("alignItems", "center"),
                ("justifyContent", "space-between"),
            ]),
        ),
        K::Hero => item(
            kind,
            "Hero",
            ElementContent::Hero(HeroContent {
                title: "Your great headline".into(),
                subtitle: "Describe what your product does and why people should choose it".into(),
                cta_text: "Start now".into(),
                secondary_cta_text: "Learn more".into(),
                image_url: String::new(),
            }),
            styles(&[
                ("backgroundColor", "#f3f4f6"),
                ("padding", "80px 48px"),
                ("display", "flex"),
                ("alignItems", "center"),
                ("justifyContent", "center"),
                ("textAlign", "center"),
            ]),
        ),
        K::Card => item(
            kind,
            "Card",
            ElementContent::Card(CardContent {
                title: "Card title".into(),
                description: "A card description that can span several lines of detail".into(),
                button_text: "Learn more".into(),
                ..Default::default()
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("borderRadius", "12px"),
                ("padding", "0"),
                ("boxShadow", SHADOW_MD),
                ("overflow", "hidden"),
            ]),
        ),
        K::Grid => item(
            kind,
            "Grid",
            ElementContent::Grid(GridContent {
                columns: 3,
                gap: 20.0,
                items: ["🚀", "⚡", "🎯", "💎", "🔥", "✨"]
                    .into_iter()
                    .enumerate()
                    .map(|(i, icon)| GridItem {
                        title: format!("Item {}", i + 1),
                        text: format!("Description {}", i + 1),
                        icon: icon.into(),
                    })
                    .collect(),
            }),
            styles(&[
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(3, 1fr)"),
                ("gap", "20px"),
                ("padding", "24px"),
            ]),
        ),
        K::Testimonial => item(
            kind,
            "Testimonial",
            ElementContent::Testimonial(TestimonialContent {
                quote: "This product changed my business! Great service and support.".into(),
                author: "Jane Doe".into(),
                role: "CEO, Company".into(),
                avatar: String::new(),
                rating: 5,
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("padding", "32px"),
                ("borderRadius", "12px"),
                ("boxShadow", SHADOW_MD),
            ]),
        ),
        K::Pricing => item(
            kind,
            "Pricing",
            ElementContent::Pricing(PricingContent {
                title: "Professional".into(),
                price: "99".into(),
                currency: "$".into(),
                period: "/month".into(),
                features: strings(&[
                    "Free domain",
                    "Unlimited bandwidth",
                    "24/7 support",
                    "SSL certificate",
                    "Daily backups",
                ]),
                button_text: "Choose plan".into(),
                popular: false,
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("padding", "32px"),
                ("borderRadius", "12px"),
                ("boxShadow", SHADOW_MD),
                ("border", "2px solid transparent"),
            ]),
        ),
        K::Team => item(
            kind,
            "Team member",
            ElementContent::Team(TeamContent {
                image: String::new(),
                name: "Alex Smith".into(),
                role: "CEO & Founder".into(),
                bio: "Professional with 10+ years of experience".into(),
                social: TeamSocial {
                    linkedin: "#".into(),
                    twitter: "#".into(),
                    email: "email@example.com".into(),
                },
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("borderRadius", "12px"),
                ("overflow", "hidden"),
                ("boxShadow", SHADOW_MD),
            ]),
        ),
        K::Cta => item(
            kind,
            "Call to action",
            ElementContent::Cta(CtaContent {
                title: "Ready to get started?".into(),
                subtitle: "Join thousands of happy customers".into(),
                button_text: "Start for free".into(),
                secondary_text: "No credit card required".into(),
            }),
            styles(&[
                ("backgroundColor", "#3B82F6"),
                ("color", "#ffffff"),
                ("padding", "64px 48px"),
                ("borderRadius", "16px"),
                ("textAlign", "center"),
            ]),
        ),
        K::Contact => item(
            kind,
            "Contact",
            ElementContent::Contact(ContactContent {
                title: "Get in touch".into(),
                items: [
                    ("phone", "Phone", "+1 555 123 456"),
                    ("mail", "Email", "info@example.com"),
                    ("map", "Address", "Main Street 1"),
                ]
                .into_iter()
                .map(|(icon, label, value)| ContactItem {
                    icon: icon.into(),
                    label: label.into(),
                    value: value.into(),
                })
                .collect(),
            }),
            styles(&[
                ("backgroundColor", "#ffffff"),
                ("padding", "32px"),
                ("borderRadius", "12px"),
                ("boxShadow", SHADOW_MD),
            ]),
        ),
        K::Stats => item(
            kind,
            "Stats",
            ElementContent::Stats(StatsContent {
                items: [
                    ("10K+", "Users"),
                    ("500+", "Projects"),
                    ("99%", "Satisfaction"),
                    ("24/7", "Support"),
                ]
                .into_iter()
                .map(|(number, label)| StatItem {
                    number: number.into(),
                    label: label.into(),
                })
                .collect(),
            }),
            styles(&[
                ("backgroundColor", "#f9fafb"),
                ("padding", "48px"),
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(4, 1fr)"),
                ("gap", "32px"),
            ]),
        ),
        K::Features => item(
            kind,
            "Features",
            ElementContent::Features(FeaturesContent {
                title: "Key features".into(),
                subtitle: "Everything you need to succeed".into(),
                items: [
                    ("⚡", "Fast", "Maximum speed"),
                    ("🔒", "Secure", "Your data stays protected"),
                    ("📱", "Responsive", "Works on every device"),
                ]
                .into_iter()
                .map(|(icon, title, description)| FeatureItem {
                    icon: icon.into(),
                    title: title.into(),
                    description: description.into(),
                })
                .collect(),
            }),
            styles(&[("padding", "48px"), ("backgroundColor", "#ffffff")]),
        ),
        K::List => item(
            kind,
            "List",
            ElementContent::List(ListContent {
                title: "List".into(),
                items: strings(&["First item", "Second item", "Third item", "Fourth item"]),
                style: ListStyle::Bullet,
            }),
            styles(&[
                ("padding", "24px"),
                ("backgroundColor", "#ffffff"),
                ("borderRadius", "8px"),
            ]),
        ),
    }
}
