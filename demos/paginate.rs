//! Example paginating a short story onto ring-bound A5 pages

use glyph_pager::{A5_RING, Glyph, GlyphTable, Paginator};
use tracing_subscriber::EnvFilter;

const STORY: &str = "  Большая деревня
Олег говорит, в деревне три улицы: Гагарина, Первомайская и третья, название которой он все время забывает.
Когда-то дискотекой гремел клуб, каждое утро открывалась школа, был фельдшерский пункт. Теперь все закрыто.



Низкая деревня захватывает домами пригорок. Олег, ежась, подходит на безлюдную остановку.
  Конец";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // Build a font table; wide letters get extra pixels
    let font = GlyphTable::new()
        .with_uniform_width("абвгдеёзийклнопрстуфхцчьъэя", 18)
        .with_uniform_width("АБВГДЕЁЗИЙКЛНОПРСТУФХЦЧЬЪЭЯ", 22)
        .with_glyph('ж', Glyph::new(26))
        .with_glyph('ш', Glyph::new(26))
        .with_glyph('щ', Glyph::new(28))
        .with_glyph('ы', Glyph::new(24))
        .with_glyph('м', Glyph::new(24))
        .with_glyph('ю', Glyph::new(24))
        .with_uniform_width(",.:", 8);

    let paginator = Paginator::new(&font, A5_RING)
        .with_compact(false)
        .with_letter_spacing(1);
    let widths = paginator.widths();
    let pagination = paginator.paginate(STORY)?;

    println!("{} pages", pagination.page_count());
    for (number, page) in pagination.iter().enumerate() {
        println!("--- page {} ---", number + 1);
        for line in page {
            let x = line.horizontal_offset(paginator.geometry(), &widths);
            println!("{:>4} | {}", x, line.text);
        }
    }

    // Preview only the first page
    let preview = Paginator::new(&font, A5_RING)
        .with_requested_page(1)
        .paginate(STORY)?;
    println!("preview holds {} page(s)", preview.page_count());

    Ok(())
}
