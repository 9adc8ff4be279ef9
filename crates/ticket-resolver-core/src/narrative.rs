//! Topic-keyed narrative templates used by the mock provider.

use crate::types::{Priority, TicketSubmission, Topic};

/// Narrative family selected by ticket topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Narrative {
    ConnectionPool,
    RateLimiter,
    ClockSkew,
    FirewallEgress,
    DependencyFailure,
}

impl Narrative {
    pub(crate) fn for_topic(topic: Topic) -> Self {
        match topic {
            Topic::Database => Self::ConnectionPool,
            Topic::Api => Self::RateLimiter,
            Topic::Authentication => Self::ClockSkew,
            Topic::Network => Self::FirewallEgress,
            _ => Self::DependencyFailure,
        }
    }
}

pub(crate) fn summary(ticket: &TicketSubmission) -> String {
    let indication = match ticket.topic {
        Topic::Database => "connection pool exhaustion",
        Topic::Api => "rate limiting threshold breach",
        Topic::Authentication => "JWT token validation failure",
        _ => "service dependency failure",
    };
    let layer = match ticket.topic {
        Topic::Backend => "Service Layer",
        Topic::Frontend => "Component Rendering",
        _ => "Data Layer",
    };
    format!(
        "TECHNICAL ANALYSIS: {} priority {} issue detected. Stack trace indicates {}. \
         Error propagation chain: Request → Middleware → {} → Exception Handler. Correlation ID: {}",
        ticket.priority.as_str().to_uppercase(),
        ticket.topic,
        indication,
        layer,
        ticket.id
    )
}

pub(crate) fn root_cause(ticket: &TicketSubmission) -> String {
    let issue = match Narrative::for_topic(ticket.topic) {
        Narrative::ConnectionPool => {
            "HikariCP connection pool reached max size (20 connections). Active connections: 20, \
             Idle: 0, Pending: 47. Query execution timeout after 30000ms. Likely cause: N+1 query \
             problem or missing index on frequently queried columns."
        }
        Narrative::RateLimiter => {
            "Rate limiter enforcing 100 req/min per client. Current rate: 347 req/min. Redis \
             counter key TTL misconfigured at 30s instead of 60s causing premature resets and \
             false positives."
        }
        Narrative::ClockSkew => {
            "JWT signature verification failing. Token payload shows exp: 1704067200, current \
             timestamp: 1704070800 (3600s drift). Server clock skew detected between auth service \
             (UTC+0) and API gateway (UTC-8 misconfigured)."
        }
        Narrative::FirewallEgress => {
            "TCP connection timeout at Layer 4. Firewall rules blocking egress on port 443 to \
             external services. iptables chain OUTPUT policy DROP without explicit ALLOW for \
             target subnet 172.16.0.0/12."
        }
        Narrative::DependencyFailure => {
            "Dependency service health check returning HTTP 503. Upstream service restart \
             detected at timestamp 2024-10-08T14:23:17Z. Circuit breaker tripped after 5 \
             consecutive failures (threshold: 50%)."
        }
    };
    let impact = if ticket.priority == Priority::Critical {
        "Production traffic affected. Estimated 1200 req/min failing. Revenue impact: $450/hour."
    } else {
        "Degraded performance. Latency increased from p95 120ms to 2400ms. User experience \
         severely impacted."
    };
    format!(
        "ROOT CAUSE ANALYSIS:\n\nException Stack Trace:\n  at {}Service.execute() [Line 247]\n  \
         at RequestHandler.process() [Line 156]\n  at Middleware.authenticate() [Line 89]\n  \n\
         Underlying Issue: {issue}\n\nImpact Assessment: {impact}",
        ticket.topic
    )
}

pub(crate) fn solution(ticket: &TicketSubmission) -> String {
    let body = match Narrative::for_topic(ticket.topic) {
        Narrative::ConnectionPool => DATABASE_SOLUTION,
        Narrative::RateLimiter => API_SOLUTION,
        Narrative::ClockSkew => AUTH_SOLUTION,
        Narrative::FirewallEgress | Narrative::DependencyFailure => GENERIC_SOLUTION,
    };
    let risk = if ticket.priority == Priority::Critical {
        "HIGH - Requires change approval board review"
    } else {
        "MEDIUM - Can be deployed via standard pipeline"
    };
    format!(
        "TECHNICAL SOLUTION:\n\n{body}\n\nESTIMATED DOWNTIME: 0 minutes (rolling deployment)\n\
         RISK LEVEL: {risk}"
    )
}

pub(crate) fn steps(ticket: &TicketSubmission) -> Vec<String> {
    let steps: &[&str] = match Narrative::for_topic(ticket.topic) {
        Narrative::ConnectionPool => &DATABASE_STEPS,
        Narrative::RateLimiter => &API_STEPS,
        Narrative::ClockSkew => &AUTH_STEPS,
        Narrative::FirewallEgress | Narrative::DependencyFailure => &GENERIC_STEPS,
    };
    steps.iter().map(|step| step.to_string()).collect()
}

const DATABASE_SOLUTION: &str = r#"1. IMMEDIATE FIX (Hotfix):
   - Scale connection pool: HikariCP.maximumPoolSize = 50
   - Enable connection timeout: connectionTimeout = 20000ms
   - Add slow query logging: log_min_duration_statement = 500ms

2. CODE OPTIMIZATION:
   ```sql
   -- Add missing index
   CREATE INDEX idx_users_email ON users(email);
   CREATE INDEX idx_orders_user_created ON orders(user_id, created_at);
   
   -- Fix N+1 query
   -- BEFORE:
   SELECT * FROM users;
   for each user: SELECT * FROM orders WHERE user_id = ?;
   
   -- AFTER:
   SELECT u.*, o.* FROM users u 
   LEFT JOIN orders o ON u.id = o.user_id;
   ```

3. MONITORING:
   - Enable pgBadger for query analysis
   - Set up connection pool metrics in Prometheus
   - Alert when active connections > 40"#;

const API_SOLUTION: &str = r#"1. RATE LIMITER CONFIG FIX:
   ```javascript
   // Update Redis TTL to match rate window
   const rateLimiter = new RateLimiter({
     points: 100,
     duration: 60, // Fixed: was 30
     blockDuration: 60,
     keyPrefix: "rl",
     storeClient: redisClient
   });
   ```

2. IMPLEMENT TOKEN BUCKET:
   ```python
   class TokenBucket:
       def __init__(self, capacity=100, refill_rate=100/60):
           self.capacity = capacity
           self.tokens = capacity
           self.refill_rate = refill_rate
           self.last_refill = time.time()
   ```

3. ADD GRACEFUL DEGRADATION:
   - Return HTTP 429 with Retry-After header
   - Implement exponential backoff on client side"#;

const AUTH_SOLUTION: &str = r#"1. TIME SYNCHRONIZATION FIX:
   ```bash
   # Install NTP on all servers
   sudo apt-get install ntp
   sudo systemctl enable ntp
   sudo systemctl start ntp
   
   # Verify time sync
   timedatectl status
   ntpq -p
   ```

2. JWT VALIDATION UPDATE:
   ```typescript
   // Add clock skew tolerance
   const verifyOptions: VerifyOptions = {
     algorithms: ["RS256"],
     issuer: "auth.example.com",
     audience: "api.example.com",
     clockTolerance: 300 // 5 minutes tolerance
   };
   
   jwt.verify(token, publicKey, verifyOptions);
   ```

3. MONITORING:
   - Add Prometheus metric for clock drift
   - Alert when drift > 60 seconds"#;

const GENERIC_SOLUTION: &str = r#"1. CONFIGURATION AUDIT:
   ```yaml
   # docker-compose.yml
   services:
     api:
       environment:
         - NODE_ENV=production
         - LOG_LEVEL=debug
         - TIMEOUT=30000
         - MAX_RETRIES=3
   ```

2. ERROR HANDLING:
   ```javascript
   try {
     const result = await service.call();
   } catch (error) {
     logger.error({
       error: error.message,
       stack: error.stack,
       correlationId: req.id
     });
     throw new ServiceError("Upstream failure", 503);
   }
   ```"#;

const DATABASE_STEPS: [&str; 8] = [
    "1. ANALYSIS: Run EXPLAIN ANALYZE on slow queries: psql -U admin -d prod -c \"EXPLAIN ANALYZE SELECT ...;\"",
    "2. BACKUP: pg_dump -U admin -Fc prod > backup_$(date +%Y%m%d_%H%M%S).dump",
    "3. INDEX CREATION: Execute DDL scripts in maintenance window (lock time ~2-5 seconds per index)",
    "4. CONNECTION POOL: Update application.properties → spring.datasource.hikari.maximumPoolSize=50",
    "5. DEPLOY: Rolling restart of application pods → kubectl rollout restart deployment/api-service",
    "6. VALIDATION: Monitor connection pool metrics → Grafana dashboard \"Database Connections\"",
    "7. PERFORMANCE TEST: Run load test → k6 run --vus 100 --duration 5m load-test.js",
    "8. DOCUMENTATION: Update runbook with new connection pool settings and index schema",
];

const API_STEPS: [&str; 8] = [
    "1. REDIS CONFIG: Update rate limiter settings → redis-cli CONFIG SET maxmemory-policy allkeys-lru",
    "2. CODE CHANGE: Modify RateLimiterMiddleware.ts → set duration from 30 to 60 seconds",
    "3. UNIT TEST: npm test src/middleware/RateLimiter.test.ts --coverage",
    "4. STAGING DEPLOY: Deploy to staging → helm upgrade api-service ./charts --set env=staging",
    "5. LOAD TEST: artillery run --target https://staging.api.example.com scenarios/rate-limit-test.yml",
    "6. CANARY RELEASE: Deploy 10% traffic → kubectl set image deployment/api api=api:v2.3.1-canary",
    "7. MONITOR METRICS: Watch error rate in DataDog → query: service:api status:error",
    "8. FULL ROLLOUT: Complete deployment if metrics are stable after 30 minutes",
];

const AUTH_STEPS: [&str; 8] = [
    "1. TIME AUDIT: Check NTP sync on all nodes → ansible all -m shell -a 'timedatectl'",
    "2. NTP SETUP: Install chrony → ansible-playbook playbooks/setup-ntp.yml",
    "3. JWT LIBRARY UPDATE: Modify auth middleware to add clockTolerance parameter",
    "4. CODE REVIEW: Create PR with changes → gh pr create --title \"Fix JWT clock skew\"",
    "5. INTEGRATION TEST: npm run test:integration -- --grep \"JWT validation\"",
    "6. SECURITY SCAN: trivy image api-service:latest → check for CVEs",
    "7. DEPLOY: Blue-green deployment → switch traffic from blue to green after validation",
    "8. POST-DEPLOY: Monitor auth failure rate → should drop from 15% to <0.1%",
];

const GENERIC_STEPS: [&str; 8] = [
    "1. LOG AGGREGATION: Query ELK stack → GET /logs-*/_search {\"query\":{\"match\":{\"level\":\"ERROR\"}}}",
    "2. DEPENDENCY GRAPH: Review service mesh topology → kubectl get virtualservices -n prod",
    "3. CIRCUIT BREAKER CONFIG: Update Istio destination rule → maxConnections: 100, http1MaxPendingRequests: 10",
    "4. RETRY POLICY: Add exponential backoff → retries: {attempts: 3, perTryTimeout: 2s, retryOn: 5xx}",
    "5. HEALTH CHECK: Fix endpoint → return 200 only when all critical deps are healthy",
    "6. FEATURE FLAG: Enable gradual rollout → LaunchDarkly flag \"new-service-integration\" → 5% users",
    "7. ROLLBACK PLAN: Prepare rollback script → kubectl rollout undo deployment/api-service",
    "8. INCIDENT REVIEW: Schedule postmortem → document RCA, timeline, prevention measures",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Department, TicketStatus, TicketType};
    use pretty_assertions::assert_eq;

    fn ticket(topic: Topic, priority: Priority) -> TicketSubmission {
        TicketSubmission {
            id: "TKT-42".to_string(),
            department: Department::Backend,
            title: "Something broke".to_string(),
            description: "Details".to_string(),
            priority,
            topic,
            ticket_type: TicketType::Incident,
            status: TicketStatus::Open,
        }
    }

    #[test]
    fn summary_interpolates_ticket_fields() {
        let text = summary(&ticket(Topic::Backend, Priority::High));
        assert!(text.starts_with("TECHNICAL ANALYSIS: HIGH priority backend issue detected."));
        assert!(text.contains("service dependency failure"));
        assert!(text.contains("Request → Middleware → Service Layer → Exception Handler"));
        assert!(text.ends_with("Correlation ID: TKT-42"));
    }

    #[test]
    fn root_cause_follows_topic() {
        let cases = [
            (Topic::Database, "HikariCP connection pool reached max size"),
            (Topic::Api, "Rate limiter enforcing 100 req/min per client"),
            (Topic::Authentication, "(3600s drift)"),
            (Topic::Network, "Firewall rules blocking egress on port 443"),
            (Topic::Mobile, "Circuit breaker tripped"),
        ];
        for (topic, needle) in cases {
            let text = root_cause(&ticket(topic, Priority::Low));
            assert!(text.contains(needle), "{topic}: {text}");
            assert!(text.contains(&format!("at {topic}Service.execute()")));
        }
    }

    #[test]
    fn impact_and_risk_depend_on_critical_priority() {
        let critical = ticket(Topic::Database, Priority::Critical);
        assert!(root_cause(&critical).contains("Revenue impact: $450/hour."));
        assert!(solution(&critical).ends_with("RISK LEVEL: HIGH - Requires change approval board review"));

        let medium = ticket(Topic::Database, Priority::Medium);
        assert!(root_cause(&medium).contains("p95 120ms to 2400ms"));
        assert!(solution(&medium).contains("RISK LEVEL: MEDIUM"));
    }

    #[test]
    fn network_shares_generic_solution_and_steps() {
        let network = ticket(Topic::Network, Priority::Low);
        let generic = ticket(Topic::Security, Priority::Low);
        assert_eq!(solution(&network), solution(&generic));
        assert_eq!(steps(&network), steps(&generic));
    }

    #[test]
    fn solutions_keep_code_samples() {
        let cases = [
            (Topic::Database, "LEFT JOIN orders o ON u.id = o.user_id;"),
            (Topic::Api, "class TokenBucket:"),
            (Topic::Authentication, "clockTolerance: 300 // 5 minutes tolerance"),
            (Topic::Frontend, "throw new ServiceError(\"Upstream failure\", 503);"),
        ];
        for (topic, needle) in cases {
            let text = solution(&ticket(topic, Priority::Low));
            assert!(text.contains(needle), "{topic}: {text}");
        }
        assert!(root_cause(&ticket(Topic::Api, Priority::Low))
            .contains("[Line 89]\n  \nUnderlying Issue: "));
    }

    #[test]
    fn every_topic_has_eight_numbered_steps() {
        for topic in Topic::ALL {
            let steps = steps(&ticket(*topic, Priority::Low));
            assert_eq!(steps.len(), 8);
            for (index, step) in steps.iter().enumerate() {
                assert!(step.starts_with(&format!("{}. ", index + 1)));
            }
        }
    }
}
