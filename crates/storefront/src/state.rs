//! Application state for one storefront session.
//!
//! `AppState` owns every slice of storefront state (cart, favorites, order
//! history, account directory and session) and writes the affected slice
//! through its repository after each mutation. There is no global instance:
//! front ends build one with [`AppState::load`] and pass it around.

use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use eclat_core::{Cart, Favorites, Order, OrderId, Product, ProductId, User, UserUpdate};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::{RepositoryError, StateRepository, StorageKey};
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::{Access, AccountDirectory, Session, SessionToken};
use crate::services::admin::{self, DashboardSummary, OrderQuery};
use crate::services::auth::{AuthError, AuthService};
use crate::services::checkout::{Checkout, CheckoutError, CheckoutStep};
use crate::services::pricing::PromoCode;

/// Distinct `ORD-nnnnnn` numbers.
const ORDER_NUMBER_SPACE: u64 = 1_000_000;

/// Random draws before falling back to a scan for a free order number.
const ORDER_ID_ATTEMPTS: usize = 32;

/// Storefront state backed by a repository.
#[derive(Debug)]
pub struct AppState<R: StateRepository> {
    config: StorefrontConfig,
    repository: R,
    catalog: Catalog,
    cart: Cart,
    favorites: Favorites,
    orders: Vec<Order>,
    accounts: AccountDirectory,
    session: Session,
}

impl<R: StateRepository> AppState<R> {
    /// Rehydrate every slice from `repository`.
    ///
    /// Missing slices start empty; the account directory starts with the
    /// demo account. A slice that no longer decodes is discarded with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the repository cannot be read and
    /// `AppError::Internal` if the bundled catalog is malformed.
    #[instrument(skip_all)]
    pub fn load(config: StorefrontConfig, repository: R) -> Result<Self> {
        let catalog = Catalog::builtin()
            .map_err(|e| AppError::Internal(format!("bundled catalog: {e}")))?;

        let cart: Cart = load_slice(&repository, StorageKey::Cart)?.unwrap_or_default();
        let favorites: Favorites =
            load_slice(&repository, StorageKey::Favorites)?.unwrap_or_default();
        let orders: Vec<Order> = load_slice(&repository, StorageKey::Orders)?.unwrap_or_default();
        let accounts = load_slice(&repository, StorageKey::Accounts)?
            .unwrap_or_else(AccountDirectory::seeded);
        let session = Session::rehydrate(
            load_slice(&repository, StorageKey::User)?,
            load_slice(&repository, StorageKey::Token)?,
            load_slice(&repository, StorageKey::GuestUser)?,
        );

        if let Some(user) = session.user() {
            set_sentry_user(&user.id, Some(&user.email));
        }

        info!(
            cart_lines = cart.lines().len(),
            favorites = favorites.len(),
            orders = orders.len(),
            access = %session.access(),
            "Storefront state loaded"
        );

        Ok(Self {
            config,
            repository,
            catalog,
            cart,
            favorites,
            orders,
            accounts,
            session,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Give back the repository, dropping in-memory state.
    #[must_use]
    pub fn into_repository(self) -> R {
        self.repository
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of price times quantity over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the cart cannot be saved.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<u32> {
        let quantity = self.cart.add(product);
        self.save_cart()?;
        add_breadcrumb("cart", "Added product", Some(&[("product_id", product.id.as_str())]));
        info!(product_id = %product.id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Add one unit of the catalog product with `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id and
    /// `AppError::Repository` if the cart cannot be saved.
    pub fn add_product_by_id(&mut self, id: &ProductId) -> Result<u32> {
        let product = self.product(id)?.clone();
        self.add_to_cart(&product)
    }

    /// Remove the line for `product_id`. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the cart cannot be saved.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<bool> {
        let removed = self.cart.remove(product_id);
        if removed {
            self.save_cart()?;
            info!(%product_id, "Removed from cart");
        }
        Ok(removed)
    }

    /// Set a line's quantity. Quantities below 1 and unknown ids are no-ops.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the cart cannot be saved.
    pub fn update_cart_item_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool> {
        let changed = self.cart.update_quantity(product_id, quantity);
        if changed {
            self.save_cart()?;
            info!(%product_id, quantity, "Cart quantity updated");
        }
        Ok(changed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the cart cannot be saved.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        self.save_cart()?;
        info!("Cart cleared");
        Ok(())
    }

    fn save_cart(&self) -> std::result::Result<(), RepositoryError> {
        self.repository.save(StorageKey::Cart, &self.cart)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    /// Add `product` to favorites. Returns whether it was newly added.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if favorites cannot be saved.
    pub fn add_to_favorites(&mut self, product: &Product) -> Result<bool> {
        let added = self.favorites.add(product);
        if added {
            self.save_favorites()?;
            info!(product_id = %product.id, "Added to favorites");
        }
        Ok(added)
    }

    /// Remove `product_id` from favorites. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if favorites cannot be saved.
    pub fn remove_from_favorites(&mut self, product_id: &ProductId) -> Result<bool> {
        let removed = self.favorites.remove(product_id);
        if removed {
            self.save_favorites()?;
            info!(%product_id, "Removed from favorites");
        }
        Ok(removed)
    }

    /// Flip favorite membership. Returns whether `product` is a favorite
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if favorites cannot be saved.
    pub fn toggle_favorite(&mut self, product: &Product) -> Result<bool> {
        let now_favorite = self.favorites.toggle(product);
        self.save_favorites()?;
        info!(product_id = %product.id, now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    fn save_favorites(&self) -> std::result::Result<(), RepositoryError> {
        self.repository.save(StorageKey::Favorites, &self.favorites)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Order history, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Orders matching an admin query.
    #[must_use]
    pub fn admin_orders(&self, query: &OrderQuery) -> Vec<&Order> {
        admin::filter_orders(&self.orders, query)
    }

    /// Admin dashboard figures over the whole history.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary<'_> {
        admin::summarize(&self.orders)
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        self.session.access()
    }

    #[must_use]
    pub const fn accounts(&self) -> &AccountDirectory {
        &self.accounts
    }

    /// Sign in with a demo account.
    ///
    /// Replaces any guest session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `AuthError::InvalidCredentials` if no
    /// account matches.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = AuthService::new(&mut self.accounts, self.config.auth_latency)
            .login(email, password)
            .await?;
        self.start_member_session(user.clone())?;
        add_breadcrumb("auth", "Logged in", Some(&[("user_id", user.id.as_str())]));
        Ok(user)
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the email is malformed or taken, or the
    /// password is too short.
    #[instrument(skip(self, password))]
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<User> {
        let user = AuthService::new(&mut self.accounts, self.config.auth_latency)
            .register(name, email, password)
            .await?;
        self.repository
            .save(StorageKey::Accounts, &self.accounts)
            .map_err(AuthError::from)?;
        self.start_member_session(user.clone())?;
        add_breadcrumb("auth", "Registered", Some(&[("user_id", user.id.as_str())]));
        Ok(user)
    }

    /// End the session and forget the user, token and guest records.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the records cannot be deleted.
    pub fn logout(&mut self) -> Result<()> {
        for key in [StorageKey::User, StorageKey::Token, StorageKey::GuestUser] {
            self.repository.delete(key)?;
        }
        self.session = Session::Anonymous;
        clear_sentry_user();
        info!("Logged out");
        Ok(())
    }

    /// Start a guest session. Ends any member session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the guest record cannot be saved.
    pub fn continue_as_guest(&mut self) -> Result<User> {
        let guest = User::guest(Utc::now().timestamp_millis());
        self.repository.delete(StorageKey::User)?;
        self.repository.delete(StorageKey::Token)?;
        self.repository.save(StorageKey::GuestUser, &guest)?;
        self.session = Session::Guest(guest.clone());
        set_sentry_user(&guest.id, None);
        info!(user_id = %guest.id, "Continuing as guest");
        Ok(guest)
    }

    /// Merge `update` into the current user.
    ///
    /// Member changes are mirrored into the account directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `AuthError::NotAuthenticated` without a
    /// session, and `AppError::Auth` with `AuthError::InvalidEmail` if the
    /// new email is malformed. A member taking another account's email gets
    /// `AuthError::UserAlreadyExists`.
    pub fn update_profile(&mut self, update: &UserUpdate) -> Result<User> {
        if let Some(email) = &update.email {
            eclat_core::Email::parse(email).map_err(AuthError::from)?;
            if let Session::Member { user, .. } = &self.session
                && self.accounts.email_taken_by_other(email, &user.id)
            {
                warn!(user_id = %user.id, "Profile email already in use");
                return Err(AuthError::UserAlreadyExists.into());
            }
        }

        let user = match &mut self.session {
            Session::Anonymous => return Err(AuthError::NotAuthenticated.into()),
            Session::Guest(user) => {
                user.apply(update);
                self.repository.save(StorageKey::GuestUser, &*user)?;
                user.clone()
            }
            Session::Member { user, .. } => {
                user.apply(update);
                self.repository.save(StorageKey::User, &*user)?;
                if self.accounts.update(&user.id, update) {
                    self.repository.save(StorageKey::Accounts, &self.accounts)?;
                }
                user.clone()
            }
        };
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    fn start_member_session(&mut self, user: User) -> std::result::Result<(), AuthError> {
        let token = SessionToken::demo(Utc::now().timestamp_millis());
        self.repository.save(StorageKey::User, &user)?;
        self.repository.save(StorageKey::Token, &token)?;
        self.repository.delete(StorageKey::GuestUser)?;
        set_sentry_user(&user.id, Some(&user.email));
        self.session = Session::Member { user, token };
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Start a checkout at the cart step.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` with `CheckoutError::AccessDenied` for an
    /// anonymous session.
    pub fn begin_checkout(&self) -> Result<Checkout> {
        if !self.access().can_checkout() {
            warn!("Checkout refused to anonymous session");
            return Err(CheckoutError::AccessDenied.into());
        }
        let mut checkout = Checkout::new(PromoCode::new(self.config.promo_code.clone()));
        if let Some(user) = self.current_user().filter(|u| !u.is_guest) {
            let details = checkout.shipping_mut();
            details.address = user.address.clone().unwrap_or_default();
            details.phone = user.phone.clone().unwrap_or_default();
        }
        Ok(checkout)
    }

    /// Place the order for the current cart.
    ///
    /// Waits the configured checkout latency, prepends the order to the
    /// history, empties the cart and moves `checkout` to `Confirmation`.
    /// If the history cannot be saved, the history, the cart and `checkout`
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` unless `checkout` is at the payment step
    /// with a non-empty cart, or if the session may not check out.
    #[instrument(skip_all, fields(step = %checkout.step()))]
    pub async fn place_order(&mut self, checkout: &mut Checkout) -> Result<Order> {
        if !self.access().can_checkout() {
            return Err(CheckoutError::AccessDenied.into());
        }
        if checkout.step() != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidTransition {
                from: checkout.step(),
                action: "place an order",
            }
            .into());
        }

        if !self.config.checkout_latency.is_zero() {
            tokio::time::sleep(self.config.checkout_latency).await;
        }

        let order_id = self
            .next_order_id()
            .ok_or_else(|| AppError::Internal("order numbers exhausted".to_string()))?;
        let order = checkout.build_order(
            &self.cart,
            order_id,
            Utc::now(),
            self.current_user().map(|user| user.email.as_str()),
        )?;

        // Nothing changes in memory until the history is stored.
        let mut orders = Vec::with_capacity(self.orders.len() + 1);
        orders.push(order.clone());
        orders.extend(self.orders.iter().cloned());
        self.repository
            .save(StorageKey::Orders, &orders)
            .map_err(CheckoutError::from)?;
        self.orders = orders;
        checkout.confirm(order.id.clone());

        self.cart.clear();
        self.save_cart().map_err(CheckoutError::from)?;

        add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.as_str())]));
        info!(
            order_id = %order.id,
            total = %order.total,
            items = order.item_count,
            "Order placed"
        );
        Ok(order)
    }

    /// A random `ORD-nnnnnn` id not yet used in the history.
    fn next_order_id(&self) -> Option<OrderId> {
        free_order_id(&self.orders, ORDER_ID_ATTEMPTS, ORDER_NUMBER_SPACE)
    }
}

/// Draw an order number below `space` that no order in `orders` uses.
///
/// After `attempts` collisions the lowest free number is taken. Returns
/// `None` once every number is in use.
fn free_order_id(orders: &[Order], attempts: usize, space: u64) -> Option<OrderId> {
    let used: HashSet<&OrderId> = orders.iter().map(|order| &order.id).collect();
    let mut rng = rand::rng();
    (0..attempts)
        .map(|_| OrderId::from_number(rng.random_range(0..space)))
        .find(|id| !used.contains(id))
        .or_else(|| {
            (0..space)
                .map(OrderId::from_number)
                .find(|id| !used.contains(id))
        })
}

/// Load one slice, discarding it if it no longer decodes.
fn load_slice<R: StateRepository, T: DeserializeOwned>(
    repository: &R,
    key: StorageKey,
) -> std::result::Result<Option<T>, RepositoryError> {
    match repository.load(key) {
        Err(RepositoryError::DataCorruption { key, source }) => {
            warn!(%key, error = %source, "Discarding corrupted state");
            Ok(None)
        }
        other => other,
    }
}
