//! Read-only catalog commands: status, menu, lunch and banquets.

use std::io::Write;

use clap::Args;
use tabled::builder::Builder;
use tracing::warn;

use dacha::{
    banquet::{BanquetCategory, LayoutType, by_category},
    lunch::LUNCH_NOT_READY,
    menu::{CategoryFilter, Menu, MenuItem, image_url},
    status::BackendStatus,
};

use crate::{
    cli::{
        CliError,
        render::{price, table},
    },
    context::AppContext,
};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only list dishes of this category id
    #[arg(long)]
    category: Option<u64>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Only list popular dishes
    #[arg(long)]
    popular: bool,

    /// Print image URLs
    #[arg(long)]
    images: bool,
}

pub(crate) async fn status(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let status = context.api.status().await.unwrap_or_else(|error| {
        warn!("status request failed: {error}");
        BackendStatus::unreachable(error.to_string())
    });

    writeln!(out, "status: {}", status.status)?;

    if let Some(message) = status.message {
        writeln!(out, "message: {message}")?;
    }

    Ok(())
}

pub(crate) async fn menu(
    args: MenuArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let menu = context.api.menu().await?;

    if args.category.is_none() && !args.popular {
        let categories: Vec<String> = menu
            .sorted_categories()
            .iter()
            .map(|category| format!("{} {}", category.id, category.name))
            .collect();

        writeln!(out, "Категории: {}", categories.join(" · "))?;
    }

    if args.popular {
        let items = menu.popular();

        if items.is_empty() {
            writeln!(out, "Популярных блюд пока нет")?;
            return Ok(());
        }

        return write_items(out, &menu, &items, args.images.then_some(context.api_url.as_str()));
    }

    let filter = args
        .category
        .map_or(CategoryFilter::All, CategoryFilter::Category);
    let page = menu.page(filter, args.page);

    if page.items.is_empty() {
        writeln!(out, "Блюд не найдено")?;
        return Ok(());
    }

    write_items(out, &menu, &page.items, args.images.then_some(context.api_url.as_str()))?;
    writeln!(out, "Страница {} из {}", page.page, page.total_pages)?;

    Ok(())
}

fn write_items(
    out: &mut impl Write,
    menu: &Menu,
    items: &[&MenuItem],
    images: Option<&str>,
) -> Result<(), CliError> {
    let mut builder = Builder::default();

    let mut header = vec!["ID", "Блюдо", "Категория", "Вес", "Цена", ""];
    if images.is_some() {
        header.push("Фото");
    }
    builder.push_record(header);

    for item in items {
        let category = item.category_name.clone().unwrap_or_else(|| {
            menu.categories
                .iter()
                .find(|category| category.id == item.category)
                .map(|category| category.name.clone())
                .unwrap_or_default()
        });

        let mut record = vec![
            item.id.to_string(),
            item.title.clone(),
            category,
            item.weight.clone(),
            price(item.price),
            if item.is_popular { "★".to_string() } else { String::new() },
        ];

        if let Some(base) = images {
            record.push(image_url(base, item.image.as_deref()));
        }

        builder.push_record(record);
    }

    writeln!(out, "{}", table(builder, 4..5))?;

    Ok(())
}

pub(crate) async fn lunch(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let Some(lunch) = context.api.lunch().await? else {
        writeln!(out, "{LUNCH_NOT_READY}")?;
        return Ok(());
    };

    writeln!(out, "Бизнес-ланч на {}", lunch.date.strftime("%d.%m.%Y"))?;

    for (heading, dishes) in [
        ("Салаты", lunch.salads()),
        ("Супы", lunch.soups()),
        ("Горячее", lunch.hot_dishes()),
        ("Гарниры, напитки, десерт", lunch.garnishes()),
    ] {
        if dishes.is_empty() {
            continue;
        }

        writeln!(out, "\n{heading}:")?;
        for dish in dishes {
            writeln!(out, "  • {dish}")?;
        }
    }

    let mut builder = Builder::default();
    builder.push_record(["Комплекс", "Цена"]);
    for combo in lunch.combos() {
        builder.push_record([combo.label.to_string(), price(combo.price)]);
    }

    writeln!(out, "\n{}", table(builder, 1..2))?;

    Ok(())
}

pub(crate) async fn banquets(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let menus = context.api.banquet_menus().await?;

    if menus.is_empty() {
        writeln!(out, "Банкетных меню пока нет")?;
        return Ok(());
    }

    for category in [BanquetCategory::Adult, BanquetCategory::Children] {
        let selected = by_category(&menus, category);

        if selected.is_empty() {
            continue;
        }

        writeln!(out, "== {} ==", category.label())?;

        for menu in selected {
            let per_person = menu
                .price_per_person
                .map(|amount| format!(", {} / чел", price(amount)))
                .unwrap_or_default();

            writeln!(out, "\n{}{per_person}", menu.title)?;

            if !menu.description.is_empty() {
                writeln!(out, "{}", menu.description)?;
            }

            match menu.layout_type {
                LayoutType::Image => writeln!(
                    out,
                    "Меню: {}",
                    image_url(&context.api_url, menu.content_image.as_deref())
                )?,
                LayoutType::List => {
                    for section in menu.sections() {
                        writeln!(out, "  {}:", section.category)?;
                        for item in section.items {
                            writeln!(out, "    • {item}")?;
                        }
                    }
                }
            }
        }

        writeln!(out)?;
    }

    Ok(())
}
