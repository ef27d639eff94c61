use serde::Deserialize;

use engage_core::model::ScrollGeometry;

/// Streams `{top, height, viewport}` to Rust on every scroll, throttled to one
/// sample per animation frame. An initial sample is sent right away.
pub(super) const SCROLL_SAMPLER: &str = r#"
(function() {
    let queued = false;
    const sample = () => {
        queued = false;
        const doc = document.documentElement;
        dioxus.send({
            top: window.scrollY || doc.scrollTop || 0,
            height: doc.scrollHeight,
            viewport: window.innerHeight,
        });
    };
    window.addEventListener("scroll", () => {
        if (!queued) {
            queued = true;
            requestAnimationFrame(sample);
        }
    }, { passive: true });
    sample();
})();
"#;

/// Smooth scrolling for in-page anchors and deferred loading for images in the
/// module body.
pub(super) const ENHANCE_CONTENT: &str = r##"
(function() {
    const body = document.getElementById("module-body");
    if (!body || body.dataset.enhanced === "1") {
        return;
    }
    body.dataset.enhanced = "1";

    body.querySelectorAll('a[href^="#"]').forEach((link) => {
        link.addEventListener("click", (event) => {
            const id = link.getAttribute("href").slice(1);
            const target = id && document.getElementById(id);
            if (target) {
                event.preventDefault();
                target.scrollIntoView({ behavior: "smooth", block: "start" });
            }
        });
    });

    const images = Array.from(body.querySelectorAll("img"));
    if (!("IntersectionObserver" in window)) {
        images.forEach((img) => img.setAttribute("loading", "lazy"));
        return;
    }
    const observer = new IntersectionObserver((entries) => {
        entries.forEach((entry) => {
            if (!entry.isIntersecting) {
                return;
            }
            const img = entry.target;
            if (img.dataset.src) {
                img.src = img.dataset.src;
                delete img.dataset.src;
            }
            img.classList.add("loaded");
            observer.unobserve(img);
        });
    });
    images.forEach((img) => {
        const src = img.getAttribute("src");
        if (src) {
            img.dataset.src = src;
            img.removeAttribute("src");
        }
        observer.observe(img);
    });
})();
"##;

pub(super) fn open_window_script(url: &str) -> String {
    format!("window.open({url:?}, \"_blank\", \"width=600,height=400\");")
}

/// One scroll sample as posted by [`SCROLL_SAMPLER`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub(super) struct ScrollSample {
    top: f64,
    height: f64,
    viewport: f64,
}

impl From<ScrollSample> for ScrollGeometry {
    fn from(sample: ScrollSample) -> Self {
        ScrollGeometry::new(sample.top, sample.height, sample.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_map_to_geometry() {
        let sample: ScrollSample =
            serde_json::from_str(r#"{"top": 120.5, "height": 2000, "viewport": 800}"#).unwrap();
        let geometry = ScrollGeometry::from(sample);
        assert_eq!(geometry, ScrollGeometry::new(120.5, 2000.0, 800.0));
    }

    #[test]
    fn window_script_quotes_url() {
        let js = open_window_script("https://twitter.com/intent/tweet?text=a%22b");
        assert!(js.starts_with(r#"window.open("https://twitter.com/intent/tweet?text=a%22b""#));
    }
}
