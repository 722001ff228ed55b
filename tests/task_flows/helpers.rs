//! Shared fixtures for task flow integration tests.

use std::sync::Arc;

use gantt::org::{
    adapters::memory::InMemoryUserDirectory,
    domain::{
        Actor, AreaId, CompanyId, OrgUser, PersistedUserData, Role, TeamId, UserId, UserStatus,
    },
    ports::DirectoryResult,
    services::ScopeResolver,
};
use gantt::task::{
    adapters::memory::{InMemoryAuditSink, InMemoryProjectCatalog, InMemoryTaskStore},
    services::{TaskPolicy, TaskService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by every flow test.
pub type FlowService = TaskService<
    InMemoryTaskStore,
    InMemoryUserDirectory,
    InMemoryProjectCatalog,
    InMemoryAuditSink,
    DefaultClock,
>;

/// One company with an admin, a supervised area of two members, and a
/// member of a second area outside every reporting line, next to an
/// unrelated company with its own admin.
pub struct FlowRig {
    pub service: FlowService,
    pub audit: Arc<InMemoryAuditSink>,
    pub company: CompanyId,
    pub area: AreaId,
    pub admin: UserId,
    pub supervisor: UserId,
    pub member: UserId,
    pub teammate: UserId,
    pub outsider: UserId,
    pub outsider_area: AreaId,
    pub foreign_company: CompanyId,
    pub foreign_admin: UserId,
}

impl FlowRig {
    pub fn admin_actor(&self) -> Actor {
        Actor::new(self.admin, Role::Admin, self.company)
    }

    pub fn supervisor_actor(&self) -> Actor {
        Actor::new(self.supervisor, Role::Supervisor, self.company).with_area(self.area)
    }

    pub fn member_actor(&self) -> Actor {
        Actor::new(self.member, Role::User, self.company).with_area(self.area)
    }

    pub fn teammate_actor(&self) -> Actor {
        Actor::new(self.teammate, Role::User, self.company).with_area(self.area)
    }

    pub fn outsider_actor(&self) -> Actor {
        Actor::new(self.outsider, Role::User, self.company).with_area(self.outsider_area)
    }

    pub fn foreign_admin_actor(&self) -> Actor {
        Actor::new(self.foreign_admin, Role::Admin, self.foreign_company)
    }

    pub fn root_actor(&self) -> Actor {
        Actor::new(UserId::new(), Role::Root, self.company)
    }
}

fn enroll(
    directory: &InMemoryUserDirectory,
    company_id: CompanyId,
    name: &str,
    role: Role,
    area_id: Option<AreaId>,
    team_id: Option<TeamId>,
    manager_id: Option<UserId>,
) -> DirectoryResult<UserId> {
    let id = UserId::new();
    directory.insert(OrgUser::from_persisted(PersistedUserData {
        id,
        display_name: name.to_owned(),
        role,
        status: UserStatus::Active,
        company_id,
        area_id,
        team_id,
        manager_id,
    }))?;
    Ok(id)
}

#[fixture]
pub fn rig() -> DirectoryResult<FlowRig> {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let company = CompanyId::new();
    let foreign_company = CompanyId::new();
    let area = AreaId::new();
    let outsider_area = AreaId::new();
    let team = TeamId::new();

    let admin = enroll(&directory, company, "Petra", Role::Admin, None, None, None)?;
    let supervisor = enroll(
        &directory,
        company,
        "Sven",
        Role::Supervisor,
        Some(area),
        None,
        Some(admin),
    )?;
    let member = enroll(
        &directory,
        company,
        "Mai",
        Role::User,
        Some(area),
        Some(team),
        Some(supervisor),
    )?;
    let teammate = enroll(
        &directory,
        company,
        "Theo",
        Role::User,
        Some(area),
        Some(team),
        Some(supervisor),
    )?;
    let outsider = enroll(
        &directory,
        company,
        "Omar",
        Role::User,
        Some(outsider_area),
        None,
        None,
    )?;
    let foreign_admin = enroll(
        &directory,
        foreign_company,
        "Faye",
        Role::Admin,
        None,
        None,
        None,
    )?;

    let audit = Arc::new(InMemoryAuditSink::new());
    let service = TaskService::new(
        Arc::new(InMemoryTaskStore::new()),
        ScopeResolver::new(directory),
        Arc::new(InMemoryProjectCatalog::new()),
        Arc::clone(&audit),
        Arc::new(DefaultClock),
        TaskPolicy::STANDARD,
    );

    Ok(FlowRig {
        service,
        audit,
        company,
        area,
        admin,
        supervisor,
        member,
        teammate,
        outsider,
        outsider_area,
        foreign_company,
        foreign_admin,
    })
}
