//! Owner-scoped listing management plus public browsing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::member_profile::MemberProfileRepository;
use agrolink_database::repositories::product::{ListingFilter, ProductRepository};
use agrolink_database::repositories::service_offering::ServiceOfferingRepository;
use agrolink_database::repositories::tool::ToolRepository;
use agrolink_entity::listing::product::{CreateProduct, Product};
use agrolink_entity::listing::service::{CreateServiceOffering, ServiceOffering};
use agrolink_entity::listing::tool::{CreateTool, Tool, ToolAvailability};
use agrolink_entity::profile::member::MemberProfile;

use crate::context::{AdminContext, RequestContext};

/// Fields shared by all listing creation requests.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewListing {
    /// Listing name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Category label.
    pub category: String,
    /// Price.
    pub price: Option<f64>,
    /// Unit the price applies to.
    pub price_unit: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
}

/// Listing management for members and public browse paths.
#[derive(Debug, Clone)]
pub struct ListingService {
    products: Arc<ProductRepository>,
    services: Arc<ServiceOfferingRepository>,
    tools: Arc<ToolRepository>,
    members: Arc<MemberProfileRepository>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(
        products: Arc<ProductRepository>,
        services: Arc<ServiceOfferingRepository>,
        tools: Arc<ToolRepository>,
        members: Arc<MemberProfileRepository>,
    ) -> Self {
        Self {
            products,
            services,
            tools,
            members,
        }
    }

    /// Create a product listing for the calling member.
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        data: NewListing,
    ) -> Result<Product, AppError> {
        let member = self.owner_profile(ctx).await?;
        let product = self
            .products
            .create(&CreateProduct {
                member_id: member.id,
                name: data.name,
                description: data.description,
                category: data.category,
                price: data.price,
                price_unit: data.price_unit,
                image_url: data.image_url,
                thumbnail_url: data.thumbnail_url,
            })
            .await?;
        info!(product_id = %product.id, member_id = %member.id, "Product created");
        Ok(product)
    }

    /// Update a product owned by the calling member.
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        data: NewListing,
    ) -> Result<Product, AppError> {
        let member = self.owner_profile(ctx).await?;
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        if product.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }

        self.products
            .update(
                product_id,
                Some(&data.name),
                data.description.as_deref(),
                Some(&data.category),
                data.price,
                data.price_unit.as_deref(),
                data.image_url.as_deref(),
                data.thumbnail_url.as_deref(),
            )
            .await
    }

    /// Deactivate a product owned by the calling member.
    pub async fn deactivate_product(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
    ) -> Result<(), AppError> {
        let member = self.owner_profile(ctx).await?;
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        if product.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }
        self.products.set_active(product_id, false).await
    }

    /// Admin moderation: hide any listing.
    pub async fn moderate_product(
        &self,
        ctx: &AdminContext,
        product_id: Uuid,
        active: bool,
    ) -> Result<(), AppError> {
        ctx.require_manage_content()?;
        self.products.set_active(product_id, active).await
    }

    /// Public product browse.
    pub async fn browse_products(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Product>, AppError> {
        self.products.browse(&filter, &page).await
    }

    /// Fetch one product.
    pub async fn get_product(&self, product_id: Uuid) -> Result<Product, AppError> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Create a service offering for the calling member.
    pub async fn create_service(
        &self,
        ctx: &RequestContext,
        data: NewListing,
    ) -> Result<ServiceOffering, AppError> {
        let member = self.owner_profile(ctx).await?;
        let service = self
            .services
            .create(&CreateServiceOffering {
                member_id: member.id,
                name: data.name,
                description: data.description,
                category: data.category,
                price: data.price,
                price_unit: data.price_unit,
                image_url: data.image_url,
                thumbnail_url: data.thumbnail_url,
            })
            .await?;
        info!(service_id = %service.id, member_id = %member.id, "Service created");
        Ok(service)
    }

    /// Update a service owned by the calling member.
    pub async fn update_service(
        &self,
        ctx: &RequestContext,
        service_id: Uuid,
        data: NewListing,
    ) -> Result<ServiceOffering, AppError> {
        let member = self.owner_profile(ctx).await?;
        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        if service.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }

        self.services
            .update(
                service_id,
                Some(&data.name),
                data.description.as_deref(),
                Some(&data.category),
                data.price,
                data.price_unit.as_deref(),
                data.image_url.as_deref(),
                data.thumbnail_url.as_deref(),
            )
            .await
    }

    /// Deactivate a service owned by the calling member.
    pub async fn deactivate_service(
        &self,
        ctx: &RequestContext,
        service_id: Uuid,
    ) -> Result<(), AppError> {
        let member = self.owner_profile(ctx).await?;
        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        if service.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }
        self.services.set_active(service_id, false).await
    }

    /// Public service browse.
    pub async fn browse_services(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<PageResponse<ServiceOffering>, AppError> {
        self.services.browse(&filter, &page).await
    }

    /// Fetch one service.
    pub async fn get_service(&self, service_id: Uuid) -> Result<ServiceOffering, AppError> {
        self.services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))
    }

    /// Create a tool listing for the calling member.
    pub async fn create_tool(
        &self,
        ctx: &RequestContext,
        data: NewListing,
        availability: ToolAvailability,
        rental_period: Option<String>,
    ) -> Result<Tool, AppError> {
        let member = self.owner_profile(ctx).await?;
        let tool = self
            .tools
            .create(&CreateTool {
                member_id: member.id,
                name: data.name,
                description: data.description,
                category: data.category,
                price: data.price,
                price_unit: data.price_unit,
                availability,
                rental_period,
                image_url: data.image_url,
                thumbnail_url: data.thumbnail_url,
            })
            .await?;
        info!(tool_id = %tool.id, member_id = %member.id, "Tool created");
        Ok(tool)
    }

    /// Update a tool owned by the calling member.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_tool(
        &self,
        ctx: &RequestContext,
        tool_id: Uuid,
        data: NewListing,
        availability: Option<ToolAvailability>,
        rental_period: Option<String>,
    ) -> Result<Tool, AppError> {
        let member = self.owner_profile(ctx).await?;
        let tool = self
            .tools
            .find_by_id(tool_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tool not found"))?;
        if tool.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }

        self.tools
            .update(
                tool_id,
                Some(&data.name),
                data.description.as_deref(),
                Some(&data.category),
                data.price,
                data.price_unit.as_deref(),
                availability,
                rental_period.as_deref(),
                data.image_url.as_deref(),
                data.thumbnail_url.as_deref(),
            )
            .await
    }

    /// Deactivate a tool owned by the calling member.
    pub async fn deactivate_tool(
        &self,
        ctx: &RequestContext,
        tool_id: Uuid,
    ) -> Result<(), AppError> {
        let member = self.owner_profile(ctx).await?;
        let tool = self
            .tools
            .find_by_id(tool_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tool not found"))?;
        if tool.member_id != member.id {
            return Err(AppError::forbidden("You do not own this listing"));
        }
        self.tools.set_active(tool_id, false).await
    }

    /// Public tool browse.
    pub async fn browse_tools(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Tool>, AppError> {
        self.tools.browse(&filter, &page).await
    }

    /// Fetch one tool.
    pub async fn get_tool(&self, tool_id: Uuid) -> Result<Tool, AppError> {
        self.tools
            .find_by_id(tool_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tool not found"))
    }

    /// The calling member's profile; listings require a verified member.
    async fn owner_profile(&self, ctx: &RequestContext) -> Result<MemberProfile, AppError> {
        ctx.require_member()?;
        ctx.require_verified()?;
        self.members
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Member profile required"))
    }
}
