#![allow(dead_code)]

// HTML pages and site tables shared by the integration tests and benches.

use std::fs;
use std::path::Path;

pub const XVIDEOS_META: &str = "\
name|h2.page-title
stars|li.model span.name
tags|a.is-keyword
views|strong#nb-views-number
likes|span.rating-good-nbr
dur|span.duration
";

pub const XVIDEOS_GALLERY: &str = "\
vid_xpath|div.thumb-block p.title a @href
img_xpath|div.thumb-block div.thumb script
";

pub const DMM_META: &str = "\
name|h1#title
stars|span#performer a
tags|td.genre a
";

pub const DMM_GALLERY: &str = "\
vid_xpath|ul#list li p.tmb a @href
img_xpath|ul#list li p.tmb img @src
";

/// Write `<sites_dir>/xvideos` and `<sites_dir>/dmm` tables pointing at `base_url`.
pub fn write_site_tables(sites_dir: &Path, base_url: &str) {
    let xvideos = sites_dir.join("xvideos");
    fs::create_dir_all(&xvideos).unwrap();
    fs::write(
        xvideos.join("niches.csv"),
        format!("base_url,{}\nNew,\nBest,/best\nAmateur,/c/Amateur-65\n", base_url),
    )
    .unwrap();
    fs::write(xvideos.join("vid_data.csv"), XVIDEOS_META).unwrap();
    fs::write(xvideos.join("gal_data.csv"), XVIDEOS_GALLERY).unwrap();

    let dmm = sites_dir.join("dmm");
    fs::create_dir_all(&dmm).unwrap();
    fs::write(dmm.join("niches.csv"), format!("base_url,{}/\n", base_url)).unwrap();
    fs::write(dmm.join("vid_data.csv"), DMM_META).unwrap();
    fs::write(dmm.join("gal_data.csv"), DMM_GALLERY).unwrap();
}

fn thumb_block(id: usize, with_image: bool) -> String {
    let image = if with_image {
        format!(
            r#"<div class="thumb"><script>xv.thumbs.prepareVideo({id});document.write('<img src="http://img-hw.xvideos.com/videos/thumbs/0a/1b/2c/0a1b2c{id:02}.{id}.jpg" />');</script></div>"#,
            id = id
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="thumb-block">{image}<p class="title"><a href="/video{id}/clip_{id}">Clip {id}</a></p></div>"#,
        image = image,
        id = id
    )
}

/// Gallery page with `videos` linked entries and `images` thumbnail scripts.
pub fn xvideos_gallery_page(videos: usize, images: usize) -> String {
    let mut body = String::from("<html><body><div id=\"content\">");

    for id in 0..videos.max(images) {
        if id < videos {
            body.push_str(&thumb_block(id, id < images));
        } else {
            // thumbnail without a title link
            body.push_str(&format!(
                r#"<div class="thumb-block"><div class="thumb"><script>document.write('<img src="http://img-hw.xvideos.com/videos/thumbs/ff/ff/ff/ffff{id:02}.1.jpg" />');</script></div></div>"#,
                id = id
            ));
        }
    }

    body.push_str("</div></body></html>");
    body
}

pub const XVIDEOS_VIDEO_PAGE: &str = r#"<html>
<head><title>Sunset Surfing</title></head>
<body>
    <h2 class="page-title">Sunset Surfing, Part 2!</h2>
    <span class="duration">1 h - 30 sec</span>
    <ul class="models">
        <li class="model"><span class="name">Kai Wave</span></li>
        <li class="model"><span class="name">Leilani</span></li>
    </ul>
    <div class="video-tags">
        <a class="is-keyword" href="/tags/beach">Beach</a>
        <a class="is-keyword" href="/tags/surf">Surf</a>
        <a class="is-keyword" href="/tags/hd">HD</a>
    </div>
    <strong id="nb-views-number">12,345</strong>
    <span class="rating-good-nbr">678</span>
</body>
</html>"#;

pub const XVIDEOS_VIDEO_PAGE_NO_TITLE: &str = r#"<html><body>
    <span class="duration">12 min</span>
    <strong id="nb-views-number">1</strong>
    <span class="rating-good-nbr">1</span>
</body></html>"#;

pub const DMM_GALLERY_PAGE: &str = r#"<html><body>
<ul id="list">
    <li><p class="tmb"><a href="/digital/videoa/-/detail/=/cid=aaa001/"><img src="//pics.example/aaa001.jpg" /></a></p></li>
    <li><p class="tmb"><a href="/digital/videoa/-/detail/=/cid=aaa002/"><img src="//pics.example/aaa002.jpg" /></a></p></li>
</ul>
</body></html>"#;

pub const DMM_VIDEO_PAGE: &str = r#"<html><body>
    <h1 id="title">Rainy Season Diary</h1>
    <span id="performer"><a href="/a/1">Yui</a></span>
    <table><tr><td class="genre"><a href="/g/1">Drama</a></td></tr></table>
</body></html>"#;
