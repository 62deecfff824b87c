//! CLI for the panelctl admin client.
//!
//! Each page of the original dashboard is a subcommand: `login`, `logout`,
//! `whoami`, `dashboard`, `categories`, `products`, `banners`, `campaigns`,
//! `announcements`, `users`, plus `upload` for images. Running without a
//! subcommand shows the dashboard summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api;
use crate::api::banners::BannerInput;
use crate::api::campaigns::CampaignInput;
use crate::api::categories::CategoryInput;
use crate::api::products::{Product, ProductInput};
use crate::client::ApiClient;
use crate::session::guard::{self, Access, Route};
use crate::tree::CategoryForest;
use crate::utils::{generate_slug, truncate};
use crate::AppContext;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "panelctl")]
#[command(author, version, about = "A command-line admin client for a storefront REST backend", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "panelctl.toml")]
    pub config: PathBuf,

    /// Override the API base URL
    #[arg(long, env = "PANELCTL_API_URL")]
    pub api_url: Option<String>,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to run (if none, shows the dashboard summary)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in to the admin panel
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long, env = "PANELCTL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and clear the local session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show resource counts across the panel
    Dashboard,

    /// Category management commands
    #[command(subcommand)]
    Categories(CategoryCommands),

    /// Product management commands
    #[command(subcommand)]
    Products(ProductCommands),

    /// Banner management commands
    #[command(subcommand)]
    Banners(BannerCommands),

    /// Campaign management commands
    #[command(subcommand)]
    Campaigns(CampaignCommands),

    /// Announcement management commands
    #[command(subcommand)]
    Announcements(AnnouncementCommands),

    /// User management commands
    #[command(subcommand)]
    Users(UserCommands),

    /// Upload one or more images
    Upload {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommands {
    /// List categories as a tree (or flat with --flat)
    List {
        /// Show a flat table instead of the tree view
        #[arg(long)]
        flat: bool,
    },
    /// Create a category
    Create {
        /// Category name
        name: String,
        /// URL slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Parent category id (omit for a root category)
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Create the category hidden from the storefront
        #[arg(long)]
        hidden: bool,
    },
    /// Update a category
    Update {
        /// Category id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        parent: Option<String>,
        /// Make the category a root
        #[arg(long, conflicts_with = "parent")]
        clear_parent: bool,
        #[arg(long)]
        image_url: Option<String>,
        /// Set visibility explicitly (true or false)
        #[arg(long)]
        visible: Option<bool>,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProductCommands {
    /// List products
    List {
        /// Only active products
        #[arg(long)]
        active: bool,
        /// Only featured products
        #[arg(long, conflicts_with = "active")]
        featured: bool,
    },
    /// Show details for a product by id or slug
    Show {
        /// Product id or slug
        product: String,
    },
    /// Create a product
    Create {
        /// Product name
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        stock: i64,
        /// Image URL (repeat for multiple images)
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sub_category: Option<String>,
        /// Feature the product on the storefront
        #[arg(long)]
        featured: bool,
        /// Create the product as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Update a product
    Update {
        /// Product id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<i64>,
        /// Replace all images (repeat for multiple)
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sub_category: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BannerCommands {
    /// List banners
    List,
    /// Create a banner
    Create {
        /// Banner title
        title: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image_url_mobile: Option<String>,
    },
    /// Update a banner
    Update {
        /// Banner id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image_url_mobile: Option<String>,
    },
    /// Delete a banner
    Delete {
        /// Banner id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CampaignCommands {
    /// List campaigns
    List,
    /// Show a campaign by slug
    Show {
        /// Campaign slug
        slug: String,
    },
    /// Create a campaign
    Create {
        /// Campaign name
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update a campaign
    Update {
        /// Campaign id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a campaign
    Delete {
        /// Campaign id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AnnouncementCommands {
    /// List announcements
    List,
    /// Create an announcement
    Create {
        /// Announcement message
        message: String,
    },
    /// Update an announcement
    Update {
        /// Announcement id
        id: String,
        /// New message
        message: String,
    },
    /// Delete an announcement
    Delete {
        /// Announcement id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// List user accounts
    List,
}

/// Route targeted by a command, for the navigation guard.
fn route_for(command: &Commands) -> Route {
    match command {
        Commands::Login { .. } => Route::Login,
        Commands::Categories(_) => Route::Categories,
        Commands::Products(_) => Route::Products,
        Commands::Banners(_) => Route::Banners,
        Commands::Campaigns(_) => Route::Campaigns,
        Commands::Announcements(_) => Route::Announcements,
        Commands::Users(_) => Route::Users,
        Commands::Logout | Commands::Whoami | Commands::Dashboard | Commands::Upload { .. } => {
            Route::Dashboard
        }
    }
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let command = cli.command.clone().unwrap_or(Commands::Dashboard);

    match guard::check(route_for(&command), ctx.client.session()) {
        Access::Allow => {}
        Access::RedirectToDashboard => {
            // Authenticated sessions are bounced away from the login screen.
            if let Some(user) = ctx.client.session().user() {
                println!("Already logged in as {}.", user.email);
            } else {
                println!("Already logged in.");
            }
            println!("Run `panelctl logout` first to switch accounts.");
            println!();
            return cmd_dashboard(ctx).await;
        }
        Access::RedirectToLogin => {
            anyhow::bail!("You are not logged in. Run `panelctl login <email>` first.");
        }
        Access::Wait => anyhow::bail!("Session state could not be resolved"),
    }

    match command {
        Commands::Login { email, password } => cmd_login(ctx, &email, &password).await,
        Commands::Logout => cmd_logout(ctx).await,
        Commands::Whoami => cmd_whoami(ctx).await,
        Commands::Dashboard => cmd_dashboard(ctx).await,
        Commands::Categories(cmd) => run_categories(ctx, cmd).await,
        Commands::Products(cmd) => run_products(ctx, cmd).await,
        Commands::Banners(cmd) => run_banners(ctx, cmd).await,
        Commands::Campaigns(cmd) => run_campaigns(ctx, cmd).await,
        Commands::Announcements(cmd) => run_announcements(ctx, cmd).await,
        Commands::Users(UserCommands::List) => cmd_users_list(ctx).await,
        Commands::Upload { files } => cmd_upload(ctx, &files).await,
    }
}

// ============================================================================
// Auth & dashboard
// ============================================================================

async fn cmd_login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let user = api::auth::login(&ctx.client, email, password).await?;
    println!("[OK] Logged in as {} ({})", user.name, user.email);
    println!("Session saved to {}", ctx.session.path().display());
    Ok(())
}

async fn cmd_logout(ctx: &AppContext) -> Result<()> {
    api::auth::logout(&ctx.client).await?;
    println!("[OK] Logged out.");
    Ok(())
}

async fn cmd_whoami(ctx: &AppContext) -> Result<()> {
    let user = api::auth::current_user(&ctx.client).await?;
    println!();
    println!("Name:   {}", user.name);
    println!("Email:  {}", user.email);
    println!("Role:   {}", user.role);
    println!("ID:     {}", user.id);
    println!();
    Ok(())
}

async fn cmd_dashboard(ctx: &AppContext) -> Result<()> {
    let client = &ctx.client;
    let (categories, products, banners, campaigns, announcements, users) = tokio::join!(
        api::categories::list(client),
        api::products::list(client),
        api::banners::list(client),
        api::campaigns::list(client),
        api::announcements::list(client),
        api::users::list(client),
    );

    println!();
    println!("=== Panel Overview ({}) ===", client.base_url());
    println!();
    print_count("Categories", categories.map(|v| v.len()));
    print_count("Products", products.map(|v| v.len()));
    print_count("Banners", banners.map(|v| v.len()));
    print_count("Campaigns", campaigns.map(|v| v.len()));
    print_count("Announcements", announcements.map(|v| v.len()));
    print_count("Users", users.map(|v| v.len()));
    println!();
    Ok(())
}

fn print_count(name: &str, count: Result<usize, crate::client::error::ClientError>) {
    match count {
        Ok(count) => println!("  {:<15} {}", name, count),
        Err(e) => println!("  {:<15} unavailable ({})", name, e),
    }
}

// ============================================================================
// Categories
// ============================================================================

async fn run_categories(ctx: &AppContext, cmd: CategoryCommands) -> Result<()> {
    match cmd {
        CategoryCommands::List { flat } => {
            let categories = api::categories::list(&ctx.client).await?;
            if categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }
            if flat {
                println!();
                println!(
                    "{:<26}  {:<24}  {:<24}  {:<26}  {}",
                    "ID", "NAME", "SLUG", "PARENT", "VISIBLE"
                );
                println!("{}", "-".repeat(110));
                for c in &categories {
                    println!(
                        "{:<26}  {:<24}  {:<24}  {:<26}  {}",
                        c.id,
                        truncate(&c.name, 24),
                        truncate(&c.slug, 24),
                        c.parent_id.as_deref().unwrap_or("-"),
                        if c.is_visible { "yes" } else { "no" }
                    );
                }
                println!();
            } else {
                println!();
                for line in CategoryForest::build(categories).render() {
                    println!("{line}");
                }
                println!();
            }
            Ok(())
        }
        CategoryCommands::Create {
            name,
            slug,
            description,
            parent,
            image_url,
            hidden,
        } => {
            let slug = slug.unwrap_or_else(|| generate_slug(&name));
            let input = CategoryInput {
                name,
                slug,
                description,
                parent_id: parent,
                image_url,
                is_visible: !hidden,
            };
            let created = api::categories::create(&ctx.client, &input).await?;
            println!("[OK] Category created: {} (/{})", created.name, created.slug);
            Ok(())
        }
        CategoryCommands::Update {
            id,
            name,
            slug,
            description,
            parent,
            clear_parent,
            image_url,
            visible,
        } => {
            let current = api::categories::get(&ctx.client, &id).await?;
            let mut input = CategoryInput::from(&current);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(slug) = slug {
                input.slug = slug;
            }
            if let Some(description) = description {
                input.description = Some(description);
            }
            if clear_parent {
                input.parent_id = None;
            } else if let Some(parent) = parent {
                input.parent_id = Some(parent);
            }
            if let Some(image_url) = image_url {
                input.image_url = Some(image_url);
            }
            if let Some(visible) = visible {
                input.is_visible = visible;
            }
            let updated = api::categories::update(&ctx.client, &id, &input).await?;
            println!("[OK] Category updated: {} (/{})", updated.name, updated.slug);
            Ok(())
        }
        CategoryCommands::Delete { id } => {
            api::categories::delete(&ctx.client, &id).await?;
            println!("[OK] Category deleted: {id}");
            Ok(())
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Find a product by id or slug. Backend ids are 24-char hex strings; try
/// that first, then fall back to the slug endpoint.
async fn find_product(client: &ApiClient, identifier: &str) -> Result<Product> {
    if identifier.len() == 24 && identifier.chars().all(|c| c.is_ascii_hexdigit()) {
        if let Ok(product) = api::products::get_by_id(client, identifier).await {
            return Ok(product);
        }
    }
    Ok(api::products::get_by_slug(client, identifier).await?)
}

async fn run_products(ctx: &AppContext, cmd: ProductCommands) -> Result<()> {
    match cmd {
        ProductCommands::List { active, featured } => {
            let products = if active {
                api::products::list_active(&ctx.client).await?
            } else if featured {
                api::products::list_featured(&ctx.client).await?
            } else {
                api::products::list(&ctx.client).await?
            };
            if products.is_empty() {
                println!("No products found.");
                return Ok(());
            }
            println!();
            println!(
                "{:<26}  {:<28}  {:>10}  {:>7}  {:<8}  {}",
                "ID", "NAME", "PRICE", "STOCK", "ACTIVE", "FEATURED"
            );
            println!("{}", "-".repeat(100));
            for p in &products {
                println!(
                    "{:<26}  {:<28}  {:>10.2}  {:>7}  {:<8}  {}",
                    p.id,
                    truncate(&p.name, 28),
                    p.price,
                    p.stock,
                    if p.is_active { "yes" } else { "no" },
                    if p.is_featured { "yes" } else { "no" }
                );
            }
            println!();
            Ok(())
        }
        ProductCommands::Show { product } => {
            let p = find_product(&ctx.client, &product).await?;
            println!();
            println!("=== Product: {} ===", p.name);
            println!();
            println!("ID:           {}", p.id);
            println!("Slug:         {}", p.slug);
            println!("Price:        {:.2}", p.price);
            println!("Stock:        {}", p.stock);
            println!(
                "Category:     {}",
                if p.category.is_empty() { "-" } else { p.category.as_str() }
            );
            println!(
                "Subcategory:  {}",
                if p.sub_category.is_empty() { "-" } else { p.sub_category.as_str() }
            );
            println!("Active:       {}", if p.is_active { "yes" } else { "no" });
            println!("Featured:     {}", if p.is_featured { "yes" } else { "no" });
            if let Some(description) = &p.description {
                println!("Description:  {description}");
            }
            if !p.images.is_empty() {
                println!("Images:");
                for image in &p.images {
                    println!("  {image}");
                }
            }
            println!();
            Ok(())
        }
        ProductCommands::Create {
            name,
            slug,
            description,
            price,
            stock,
            images,
            category,
            sub_category,
            featured,
            inactive,
        } => {
            let slug = slug.unwrap_or_else(|| generate_slug(&name));
            let input = ProductInput {
                name,
                slug,
                description,
                price,
                stock,
                images,
                category: category.unwrap_or_default(),
                sub_category: sub_category.unwrap_or_default(),
                is_featured: featured,
                is_active: !inactive,
            };
            let created = api::products::create(&ctx.client, &input).await?;
            println!("[OK] Product created: {} (/{})", created.name, created.slug);
            Ok(())
        }
        ProductCommands::Update {
            id,
            name,
            slug,
            description,
            price,
            stock,
            images,
            category,
            sub_category,
            featured,
            active,
        } => {
            let current = api::products::get_by_id(&ctx.client, &id).await?;
            let mut input = ProductInput::from(&current);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(slug) = slug {
                input.slug = slug;
            }
            if let Some(description) = description {
                input.description = Some(description);
            }
            if let Some(price) = price {
                input.price = price;
            }
            if let Some(stock) = stock {
                input.stock = stock;
            }
            if !images.is_empty() {
                input.images = images;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(sub_category) = sub_category {
                input.sub_category = sub_category;
            }
            if let Some(featured) = featured {
                input.is_featured = featured;
            }
            if let Some(active) = active {
                input.is_active = active;
            }
            let updated = api::products::update(&ctx.client, &id, &input).await?;
            println!("[OK] Product updated: {} (/{})", updated.name, updated.slug);
            Ok(())
        }
        ProductCommands::Delete { id } => {
            api::products::delete(&ctx.client, &id).await?;
            println!("[OK] Product deleted: {id}");
            Ok(())
        }
    }
}

// ============================================================================
// Banners
// ============================================================================

async fn run_banners(ctx: &AppContext, cmd: BannerCommands) -> Result<()> {
    match cmd {
        BannerCommands::List => {
            let banners = api::banners::list(&ctx.client).await?;
            if banners.is_empty() {
                println!("No banners found.");
                return Ok(());
            }
            println!();
            println!("{:<26}  {:<28}  {:<24}  {}", "ID", "TITLE", "SLUG", "IMAGE");
            println!("{}", "-".repeat(110));
            for b in &banners {
                println!(
                    "{:<26}  {:<28}  {:<24}  {}",
                    b.id,
                    truncate(&b.title, 28),
                    truncate(&b.slug, 24),
                    b.image_url.as_deref().unwrap_or("-")
                );
            }
            println!();
            Ok(())
        }
        BannerCommands::Create {
            title,
            slug,
            image_url,
            image_url_mobile,
        } => {
            let slug = slug.unwrap_or_else(|| generate_slug(&title));
            let input = BannerInput {
                title,
                slug,
                image_url,
                image_url_mobile,
            };
            let created = api::banners::create(&ctx.client, &input).await?;
            println!("[OK] Banner created: {} (/{})", created.title, created.slug);
            Ok(())
        }
        BannerCommands::Update {
            id,
            title,
            slug,
            image_url,
            image_url_mobile,
        } => {
            let current = api::banners::get(&ctx.client, &id).await?;
            let mut input = BannerInput::from(&current);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(slug) = slug {
                input.slug = slug;
            }
            if let Some(image_url) = image_url {
                input.image_url = Some(image_url);
            }
            if let Some(image_url_mobile) = image_url_mobile {
                input.image_url_mobile = Some(image_url_mobile);
            }
            let updated = api::banners::update(&ctx.client, &id, &input).await?;
            println!("[OK] Banner updated: {} (/{})", updated.title, updated.slug);
            Ok(())
        }
        BannerCommands::Delete { id } => {
            api::banners::delete(&ctx.client, &id).await?;
            println!("[OK] Banner deleted: {id}");
            Ok(())
        }
    }
}

// ============================================================================
// Campaigns
// ============================================================================

async fn run_campaigns(ctx: &AppContext, cmd: CampaignCommands) -> Result<()> {
    match cmd {
        CampaignCommands::List => {
            let campaigns = api::campaigns::list(&ctx.client).await?;
            if campaigns.is_empty() {
                println!("No campaigns found.");
                return Ok(());
            }
            println!();
            println!("{:<26}  {:<28}  {:<24}  {}", "ID", "NAME", "SLUG", "IMAGE");
            println!("{}", "-".repeat(110));
            for c in &campaigns {
                println!(
                    "{:<26}  {:<28}  {:<24}  {}",
                    c.id,
                    truncate(&c.name, 28),
                    truncate(&c.slug, 24),
                    c.image_url.as_deref().unwrap_or("-")
                );
            }
            println!();
            Ok(())
        }
        CampaignCommands::Show { slug } => {
            let campaign = api::campaigns::get_by_slug(&ctx.client, &slug).await?;
            println!();
            println!("=== Campaign: {} ===", campaign.name);
            println!();
            println!("ID:     {}", campaign.id);
            println!("Slug:   {}", campaign.slug);
            println!("Image:  {}", campaign.image_url.as_deref().unwrap_or("-"));
            println!();
            Ok(())
        }
        CampaignCommands::Create {
            name,
            slug,
            image_url,
        } => {
            let slug = slug.unwrap_or_else(|| generate_slug(&name));
            let input = CampaignInput {
                name,
                slug,
                image_url,
            };
            let created = api::campaigns::create(&ctx.client, &input).await?;
            println!("[OK] Campaign created: {} (/{})", created.name, created.slug);
            Ok(())
        }
        CampaignCommands::Update {
            id,
            name,
            slug,
            image_url,
        } => {
            let current = api::campaigns::get(&ctx.client, &id).await?;
            let mut input = CampaignInput::from(&current);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(slug) = slug {
                input.slug = slug;
            }
            if let Some(image_url) = image_url {
                input.image_url = Some(image_url);
            }
            let updated = api::campaigns::update(&ctx.client, &id, &input).await?;
            println!("[OK] Campaign updated: {} (/{})", updated.name, updated.slug);
            Ok(())
        }
        CampaignCommands::Delete { id } => {
            api::campaigns::delete(&ctx.client, &id).await?;
            println!("[OK] Campaign deleted: {id}");
            Ok(())
        }
    }
}

// ============================================================================
// Announcements & users
// ============================================================================

async fn run_announcements(ctx: &AppContext, cmd: AnnouncementCommands) -> Result<()> {
    match cmd {
        AnnouncementCommands::List => {
            let announcements = api::announcements::list(&ctx.client).await?;
            if announcements.is_empty() {
                println!("No announcements found.");
                return Ok(());
            }
            println!();
            println!("{:<26}  {:<60}  {}", "ID", "MESSAGE", "CREATED");
            println!("{}", "-".repeat(105));
            for a in &announcements {
                let created = a
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<26}  {:<60}  {}", a.id, truncate(&a.message, 60), created);
            }
            println!();
            Ok(())
        }
        AnnouncementCommands::Create { message } => {
            let created = api::announcements::create(&ctx.client, &message).await?;
            println!("[OK] Announcement created: {}", created.id);
            Ok(())
        }
        AnnouncementCommands::Update { id, message } => {
            api::announcements::update(&ctx.client, &id, &message).await?;
            println!("[OK] Announcement updated: {id}");
            Ok(())
        }
        AnnouncementCommands::Delete { id } => {
            api::announcements::delete(&ctx.client, &id).await?;
            println!("[OK] Announcement deleted: {id}");
            Ok(())
        }
    }
}

async fn cmd_users_list(ctx: &AppContext) -> Result<()> {
    let users = api::users::list(&ctx.client).await?;
    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }
    println!();
    println!("{:<26}  {:<24}  {:<30}  {}", "ID", "NAME", "EMAIL", "ROLE");
    println!("{}", "-".repeat(100));
    for u in &users {
        println!(
            "{:<26}  {:<24}  {:<30}  {}",
            u.id,
            truncate(&u.name, 24),
            truncate(&u.email, 30),
            u.role
        );
    }
    println!();
    Ok(())
}

// ============================================================================
// Uploads
// ============================================================================

async fn cmd_upload(ctx: &AppContext, files: &[PathBuf]) -> Result<()> {
    let report = api::upload::upload_images(&ctx.client, files).await;

    for uploaded in &report.uploaded {
        println!("[OK] {} -> {}", uploaded.path.display(), uploaded.url);
    }
    for failure in &report.failed {
        println!("[!!] {}: {}", failure.path.display(), failure.message);
    }

    if report.is_total_failure() {
        anyhow::bail!("All {} upload(s) failed", report.failed.len());
    }
    if report.is_partial() {
        println!();
        println!(
            "[!] Partial success: {} uploaded, {} failed.",
            report.uploaded.len(),
            report.failed.len()
        );
    }
    Ok(())
}
