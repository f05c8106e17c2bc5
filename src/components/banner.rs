// Static promotional banner, rendered from a fixed list of slides.

use super::escape_html;

/// A single promotional slide in the storefront banner.
#[derive(Debug, Clone)]
pub struct BannerSlide {
    pub image_url: String,
    pub link: String,
    pub alt: String,
}

impl BannerSlide {
    pub fn new(
        image_url: impl Into<String>,
        link: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            link: link.into(),
            alt: alt.into(),
        }
    }
}

/// The fixed slide list shown on catalog pages.
pub fn default_slides() -> Vec<BannerSlide> {
    vec![
        BannerSlide::new("/images/banner-1.webp", "/category/dien-thoai", "Điện thoại"),
        BannerSlide::new("/images/banner-2.webp", "/category/laptop", "Laptop"),
        BannerSlide::new("/images/banner-3.webp", "/category/phu-kien", "Phụ kiện"),
    ]
}

/// Render the slide list to an HTML fragment.
pub fn render(slides: &[BannerSlide]) -> String {
    let mut out = String::from("<section class=\"banner\">");
    for slide in slides {
        out.push_str(&format!(
            "<a href=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></a>",
            escape_html(&slide.link),
            escape_html(&slide.image_url),
            escape_html(&slide.alt)
        ));
    }
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_default_slide() {
        let html = render(&default_slides());
        assert!(html.starts_with("<section class=\"banner\">"));
        assert_eq!(html.matches("<img ").count(), 3);
        assert!(html.contains("/images/banner-1.webp"));
    }

    #[test]
    fn escapes_slide_fields() {
        let slides = [BannerSlide::new("/a.webp", "/x?a=1&b=2", "\"Sale\"")];
        let html = render(&slides);
        assert!(html.contains("/x?a=1&amp;b=2"));
        assert!(html.contains("&quot;Sale&quot;"));
    }
}
