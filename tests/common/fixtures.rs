//! Test fixtures and sample articles.

/// A short plain-text article with a known word list.
pub const SHORT_ARTICLE: &str = "Hello world. This is a test.";

/// A multi-paragraph article for paragraph counting and layered renders.
pub const LONG_ARTICLE: &str = "\
The tide chart on the harbor wall had been wrong for years, and nobody minded.\n\
Fishermen read the water instead, the way their parents had.\n\
\n\
When the new sensors arrived, bolted to the pilings overnight, the chart was\n\
finally corrected. The corrections changed nothing about the fishing.\n\
\n\
What changed was the arguing. You cannot argue with a sensor, so the harbor\n\
found other things to disagree about, and it turned out there were plenty.";

/// An HTML article exercising tag stripping and paragraph tags.
pub const HTML_ARTICLE: &str = "\
<h1>On Lighthouses</h1>\
<p>The first keeper kept a diary of nothing but the weather.</p>\
<p>The second keeper kept no diary at all, &amp; we know more about her.</p>";
